use rst_common::with_logging::log::debug;
use rst_common::with_tokio::tokio::sync::broadcast::{self, Receiver, Sender};

use prople_courier_core::identity::mediator::events::AgentEvent;
use prople_courier_core::identity::mediator::types::EventSourceBuilder;

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// `EventHub` is an in-process fan out of the agent state notifications
///
/// Every subscriber receives the events published after its subscription, a slow
/// subscriber may lag and lose the oldest events once `capacity` is exceeded
#[derive(Clone)]
pub struct EventHub {
    sender: Sender<AgentEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns the number of subscribers the event delivered to
    pub fn publish(&self, event: AgentEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(err) => {
                debug!(
                    "[events:publish] no active subscriber, dropping: {:?}",
                    err.0
                );
                0
            }
        }
    }

    pub fn subscribers(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventSourceBuilder for EventHub {
    fn subscribe(&self) -> Receiver<AgentEvent> {
        self.sender.subscribe()
    }
}
