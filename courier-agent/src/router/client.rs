use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use prople_courier_core::identity::mediator::types::{
    Invitation, MediatorError, RouterClientBuilder, ROUTER_CREATE_INVITATION_PATH,
};

#[derive(Serialize)]
#[serde(crate = "self::serde")]
struct CreateInvitationRequest {
    label: String,
}

#[derive(Deserialize)]
#[serde(crate = "self::serde")]
struct CreateInvitationResponse {
    #[serde(default)]
    invitation: Option<Value>,
}

#[derive(Clone)]
pub struct RouterClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl RouterClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn build_url(endpoint: &str) -> String {
        format!(
            "{}{}",
            endpoint.strip_suffix('/').unwrap_or(endpoint),
            ROUTER_CREATE_INVITATION_PATH
        )
    }
}

#[async_trait]
impl RouterClientBuilder for RouterClient {
    async fn create_invitation(
        &self,
        endpoint: String,
        label: String,
    ) -> Result<Invitation, MediatorError> {
        let url = Self::build_url(&endpoint);
        debug!("[router:create_invitation] requesting: {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header(
                "User-Agent",
                format!("courier-agent/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&CreateInvitationRequest { label })
            .send()
            .await
            .map_err(|err| MediatorError::NetworkError(err.to_string()))?
            .error_for_status()
            .map_err(|err| MediatorError::NetworkError(err.to_string()))?;

        let body = response
            .json::<CreateInvitationResponse>()
            .await
            .map_err(|err| MediatorError::NetworkError(err.to_string()))?;

        match body.invitation {
            Some(invitation) if !invitation.is_null() => Ok(Invitation::from(invitation)),
            _ => Err(MediatorError::NetworkError(String::from(
                "missing invitation",
            ))),
        }
    }
}
