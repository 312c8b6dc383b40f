//! `prople-courier-agent` provides the concrete adapters of the `courier` domain
//!
//! It parses the TOML configuration, builds the http router client and the in-process
//! event hub, and wires them into the domain usecases provided by `prople-courier-core`
use prople_courier_core::identity::mediator::types::AgentBuilder;
use prople_courier_core::identity::mediator::usecase::Usecase as MediatorUsecase;
use prople_courier_core::identity::sds::types::SyncOptions;

use rst_common::with_logging::log::debug;

pub mod common;
pub mod config;
pub mod events;
pub mod router;

use common::helpers;
use common::types::CommonError;
use config::{Config, Parser as ConfigManager};
use router::RouterClient;

pub type MediatorConnector<TAgent> = MediatorUsecase<RouterClient, TAgent>;

/// `CourierAgent` holds a validated configuration and builds the adapters from it
#[derive(Clone)]
pub struct CourierAgent {
    config: Config,
}

impl CourierAgent {
    pub fn new(conf_file: String) -> Result<Self, CommonError> {
        debug!("[agent:new] config file: {}", conf_file);

        let config = ConfigManager::new(conf_file)
            .parse()
            .map_err(|err| CommonError::ConfigError(err.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, CommonError> {
        helpers::validate(config.clone())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn router_endpoint(&self) -> String {
        self.config.mediator().get_router_endpoint()
    }

    pub fn build_router_client(&self) -> RouterClient {
        RouterClient::new(self.config.mediator().get_request_timeout())
    }

    pub fn build_mediator<TAgent>(&self, agent: TAgent) -> MediatorConnector<TAgent>
    where
        TAgent: AgentBuilder,
    {
        MediatorUsecase::with_options(
            self.build_router_client(),
            agent,
            self.config.mediator().connector_options(),
        )
    }

    pub fn build_sync_options(&self) -> SyncOptions {
        self.config.sds().sync_options()
    }
}
