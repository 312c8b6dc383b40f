use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, PartialEq, Error, Clone)]
pub enum SessionError {
    #[error("unable to lookup registered user: {0}")]
    LookupError(String),
}

/// `RegisteredUser` is the logged in wallet user owning the remote data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct RegisteredUser {
    pub id: String,
}

/// `SyncOptions` holds the remote `SDS` server url, an empty or missing url
/// disables the synchronization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOptions {
    server_url: Option<String>,
}

impl SyncOptions {
    pub fn new(server_url: Option<String>) -> Self {
        Self { server_url }
    }

    pub fn server_url(&self) -> Option<String> {
        self.server_url.to_owned().filter(|url| !url.is_empty())
    }

    pub fn is_enabled(&self) -> bool {
        self.server_url().is_some()
    }
}

#[async_trait]
pub trait UserSessionBuilder: Send + Sync {
    async fn registered_user(&self) -> Result<Option<RegisteredUser>, SessionError>;
}
