use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use prople_courier_core::identity::mediator::types::{
    ConnectorOptions, DEFAULT_AGENT_LABEL, DEFAULT_COMPLETION_TIMEOUT_SECS,
    DEFAULT_INVITATION_LABEL, DEFAULT_ROUTER_LABEL,
};

use crate::common::types::{CommonError, ToValidate};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_agent_label() -> String {
    DEFAULT_AGENT_LABEL.to_string()
}

fn default_router_label() -> String {
    DEFAULT_ROUTER_LABEL.to_string()
}

fn default_invitation_label() -> String {
    DEFAULT_INVITATION_LABEL.to_string()
}

fn default_completion_timeout_secs() -> u64 {
    DEFAULT_COMPLETION_TIMEOUT_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Mediator {
    pub(super) router_endpoint: String,

    #[serde(default = "default_agent_label")]
    pub(super) agent_label: String,

    #[serde(default = "default_router_label")]
    pub(super) router_label: String,

    #[serde(default = "default_invitation_label")]
    pub(super) invitation_label: String,

    #[serde(default = "default_completion_timeout_secs")]
    pub(super) completion_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub(super) request_timeout_secs: u64,
}

impl Mediator {
    pub fn get_router_endpoint(&self) -> String {
        self.router_endpoint.to_owned()
    }

    pub fn get_request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connector_options(&self) -> ConnectorOptions {
        ConnectorOptions {
            agent_label: self.agent_label.to_owned(),
            router_label: self.router_label.to_owned(),
            invitation_label: self.invitation_label.to_owned(),
            completion_timeout: Duration::from_secs(self.completion_timeout_secs),
        }
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self {
            router_endpoint: "".to_string(),
            agent_label: default_agent_label(),
            router_label: default_router_label(),
            invitation_label: default_invitation_label(),
            completion_timeout_secs: default_completion_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ToValidate for Mediator {
    fn validate(&self) -> Result<(), CommonError> {
        if self.router_endpoint.is_empty() {
            return Err(CommonError::ValidationError(
                "config: mediator:router_endpoint is missing".to_string(),
            ));
        }

        if !self.router_endpoint.starts_with("http://")
            && !self.router_endpoint.starts_with("https://")
        {
            return Err(CommonError::ValidationError(format!(
                "config: mediator:router_endpoint must be an http url: {}",
                self.router_endpoint
            )));
        }

        if self.completion_timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: mediator:completion_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: mediator:request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
