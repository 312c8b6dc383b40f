use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const RESPONSE_DATA_TYPE: &str = "Response";

/// `StoreError` provides all specific error types relate with the wallet store
#[derive(Debug, PartialEq, Error, Clone)]
pub enum StoreError {
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("unable to save credential: {0}")]
    SaveCredentialError(String),

    #[error("unable to save presentation: {0}")]
    SavePresentationError(String),

    #[error("sds error: {0}")]
    SdsError(String),

    #[error("{0}")]
    NotLoggedIn(String),

    #[error("json error: {0}")]
    JSONError(String),

    #[error("responder error: {0}")]
    ResponderError(String),
}

/// `CredentialRecord` is a single named credential going to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialRecord {
    pub name: String,
    pub credential: Value,
}

/// `HandlerResponse` is sent back to the credential handler which requested the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct HandlerResponse {
    #[serde(rename = "dataType")]
    pub data_type: String,
    pub data: String,
}

impl HandlerResponse {
    pub fn new(status: &str) -> Self {
        Self {
            data_type: RESPONSE_DATA_TYPE.to_string(),
            data: status.to_string(),
        }
    }
}

/// `LocalSaveRequest` is the payload saved by the agent local verifiable store, the
/// credential is kept as its `JSON` string form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct LocalSaveRequest {
    pub name: String,

    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct SdsSaveCredentialRequest {
    pub name: String,
    pub credential: Value,

    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct SdsSavePresentationRequest {
    pub name: String,
    pub presentation: Value,

    #[serde(rename = "userID")]
    pub user_id: String,
}

/// `StoreAPI` is main entrypoint to communicate with the wallet store domain
#[async_trait]
pub trait StoreAPI {
    /// `save_credential` saves a single `VC` when `is_vc` is true, otherwise the given value
    /// is a `VP` and each of its credentials is saved as its own record
    ///
    /// The save status is sent to the credential handler and also returned. A failed save
    /// is reported through the status, only a responder failure is returned as an error
    async fn save_credential(
        &self,
        name: String,
        credential: Value,
        is_vc: bool,
    ) -> Result<String, StoreError>;

    async fn save(&self, name: String, vc: Value) -> Result<(), StoreError>;

    /// `save_presentation` saves the presentation to the remote `SDS` only
    async fn save_presentation(&self, name: String, presentation: Value) -> Result<(), StoreError>;

    async fn cancel(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait VerifiableStoreBuilder: Send + Sync {
    async fn save_credential(&self, request: LocalSaveRequest) -> Result<(), StoreError>;
}

#[async_trait]
pub trait SdsStoreClientBuilder: Send + Sync {
    async fn save_credential(&self, request: SdsSaveCredentialRequest) -> Result<(), StoreError>;

    async fn save_presentation(
        &self,
        request: SdsSavePresentationRequest,
    ) -> Result<(), StoreError>;
}

/// `ResponderBuilder` answers the credential handler event which triggered the store
#[async_trait]
pub trait ResponderBuilder: Send + Sync {
    async fn respond(&self, response: HandlerResponse) -> Result<(), StoreError>;
}
