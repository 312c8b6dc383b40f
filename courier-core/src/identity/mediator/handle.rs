use std::sync::Arc;

use rst_common::with_logging::log::info;

use super::types::{MediatorClientBuilder, MediatorError};

/// `DisconnectHandle` is returned by a successful `connect`
///
/// The caller owns its lifecycle. Calling [`DisconnectHandle::disconnect`] more than once
/// is idempotent only to the extent the agent `unregister` call is
pub struct DisconnectHandle<TMediator>
where
    TMediator: MediatorClientBuilder,
{
    mediator: Arc<TMediator>,
}

impl<TMediator> DisconnectHandle<TMediator>
where
    TMediator: MediatorClientBuilder,
{
    pub fn new(mediator: Arc<TMediator>) -> Self {
        Self { mediator }
    }

    pub async fn disconnect(&self) -> Result<(), MediatorError> {
        self.mediator.unregister().await?;
        info!("[mediator:disconnect] router unregistered");
        Ok(())
    }
}

impl<TMediator> Clone for DisconnectHandle<TMediator>
where
    TMediator: MediatorClientBuilder,
{
    fn clone(&self) -> Self {
        Self {
            mediator: self.mediator.clone(),
        }
    }
}
