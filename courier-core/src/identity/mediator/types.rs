use std::sync::Arc;
use std::time::Duration;

use derive_more::{AsRef, Display, From, Into};

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};
use rst_common::with_tokio::tokio::sync::broadcast::Receiver;

use tokio_util::sync::CancellationToken;

use super::events::AgentEvent;
use super::handle::DisconnectHandle;

pub const ROUTER_CREATE_INVITATION_PATH: &str = "/outofband/create-invitation";
pub const STATE_COMPLETED: &str = "completed";
pub const TOPIC_DIDEXCHANGE_STATES: &str = "didexchange_states";

pub const DEFAULT_AGENT_LABEL: &str = "agent-default-label";
pub const DEFAULT_ROUTER_LABEL: &str = "mediator-label";
pub const DEFAULT_INVITATION_LABEL: &str = "agent-label";
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;

/// `MediatorError` is a base error types for the `Mediator` domain
#[derive(Debug, PartialEq, Error, Clone)]
pub enum MediatorError {
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("protocol error: {0}")]
    ProtocolError(String),

    #[error("timeout: completion event not observed after {0:?}")]
    Timeout(Duration),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("event channel closed")]
    EventChannelClosed,

    #[error("router not registered")]
    NotRegistered,
}

/// `AgentError` is the structured error kind returned by the agent capabilities
///
/// The connector classifies agent failures by matching these variants, an agent adapter
/// must translate its own failures into one of them
#[derive(Debug, PartialEq, Error, Clone)]
pub enum AgentError {
    #[error("router not registered")]
    RouterNotRegistered,

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("agent unavailable: {0}")]
    Unavailable(String),
}

impl From<AgentError> for MediatorError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::RouterNotRegistered => MediatorError::NotRegistered,
            AgentError::Rejected(msg) => MediatorError::ProtocolError(msg),
            AgentError::Unavailable(msg) => MediatorError::ProtocolError(msg),
        }
    }
}

/// Identifier of a `DID Exchange` connection tracked by the agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct ConnectionID(String);

impl ConnectionID {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `Invitation` is an opaque payload issued by a router or minted by our own agent
///
/// Its structure belongs to the external `Out-Of-Band` protocol, this crate never inspects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From, Into, AsRef)]
#[serde(crate = "self::serde")]
pub struct Invitation(Value);

impl Invitation {
    pub fn value(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct AcceptInvitationRequest {
    pub my_label: String,
    pub invitation: Invitation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct AcceptInvitationResponse {
    pub connection_id: ConnectionID,
}

/// `MediatorConnection` is the current router connection registered at the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct MediatorConnection {
    #[serde(rename = "connectionID")]
    pub connection_id: ConnectionID,
}

/// `ConnectorOptions` contains the labels and the completion bound used by the connector
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorOptions {
    pub agent_label: String,
    pub router_label: String,
    pub invitation_label: String,
    pub completion_timeout: Duration,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            agent_label: DEFAULT_AGENT_LABEL.to_string(),
            router_label: DEFAULT_ROUTER_LABEL.to_string(),
            invitation_label: DEFAULT_INVITATION_LABEL.to_string(),
            completion_timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
        }
    }
}

/// `RouterClientBuilder` is a trait behavior used to request an invitation from a router
/// endpoint offering the invitation-creation capability
///
/// Implementers must not retry, a failed request is reported as [`MediatorError::NetworkError`]
#[async_trait]
pub trait RouterClientBuilder: Send + Sync {
    async fn create_invitation(
        &self,
        endpoint: String,
        label: String,
    ) -> Result<Invitation, MediatorError>;
}

/// Out-of-band protocol capabilities of the agent
#[async_trait]
pub trait OutOfBandBuilder: Send + Sync {
    async fn accept_invitation(
        &self,
        request: AcceptInvitationRequest,
    ) -> Result<AcceptInvitationResponse, AgentError>;

    async fn create_invitation(&self, label: String) -> Result<Invitation, AgentError>;
}

/// Mediator (router client) capabilities of the agent
///
/// `get_connection` must fail with [`AgentError::RouterNotRegistered`] when there is no
/// registered router
#[async_trait]
pub trait MediatorClientBuilder: Send + Sync {
    async fn register(&self, connection_id: ConnectionID) -> Result<(), AgentError>;
    async fn unregister(&self) -> Result<(), AgentError>;
    async fn get_connection(&self) -> Result<MediatorConnection, AgentError>;
    async fn reconnect(&self, connection_id: ConnectionID) -> Result<(), AgentError>;
}

/// `EventSourceBuilder` gives access to the agent asynchronous notifications
///
/// Each call to `subscribe` must return a fresh receiver that observes every event
/// published after the call
pub trait EventSourceBuilder: Send + Sync {
    fn subscribe(&self) -> Receiver<AgentEvent>;
}

/// `AgentBuilder` is the capability surface of an externally constructed agent
///
/// It is injected into the connector, there is no global agent handle
pub trait AgentBuilder: Clone + Send + Sync {
    type OutOfBandImplementer: OutOfBandBuilder;
    type MediatorImplementer: MediatorClientBuilder;
    type EventsImplementer: EventSourceBuilder;

    fn outofband(&self) -> Arc<Self::OutOfBandImplementer>;
    fn mediator(&self) -> Arc<Self::MediatorImplementer>;
    fn events(&self) -> Arc<Self::EventsImplementer>;
}

/// `MediatorAPI` is main entrypoint to communicate with the `Mediator` domain
#[async_trait]
pub trait MediatorAPI {
    type MediatorImplementer: MediatorClientBuilder;

    /// `connect` drives the handshake that turns "no mediator" into "registered mediator"
    ///
    /// The returned [`DisconnectHandle`] unregisters the router when invoked
    async fn connect(
        &self,
        endpoint: String,
    ) -> Result<DisconnectHandle<Self::MediatorImplementer>, MediatorError>;

    /// `connect_with_cancel` is the same flow as `connect`, the completion wait
    /// is aborted when the given token is cancelled
    async fn connect_with_cancel(
        &self,
        endpoint: String,
        cancel: CancellationToken,
    ) -> Result<DisconnectHandle<Self::MediatorImplementer>, MediatorError>;

    /// `reconnect` is best-effort, failures are only logged
    async fn reconnect(&self);

    async fn is_already_connected(&self) -> Result<bool, MediatorError>;

    async fn create_invitation(&self) -> Result<Invitation, MediatorError>;
}
