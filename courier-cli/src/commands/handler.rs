use rst_common::with_logging::log::debug;

use prople_courier_agent::CourierAgent;

use crate::types::CliError;

pub struct ContextHandler {
    config_file: String,
}

impl ContextHandler {
    pub fn new(config_file: String) -> Self {
        debug!("[ctx:new] config file: {config_file}");
        Self { config_file }
    }

    pub fn config_file(&self) -> String {
        self.config_file.clone()
    }

    pub fn agent(&self) -> Result<CourierAgent, CliError> {
        CourierAgent::new(self.config_file.to_owned())
            .map_err(|err| CliError::ConfigError(err.to_string()))
    }

    /// An explicit level wins over `app.log_level`, an unreadable config gives `None`
    pub fn log_level(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| {
            self.agent()
                .ok()
                .map(|agent| agent.config().app().get_log_level())
        })
    }
}
