//! # Mediator Module
//!
//! The `mediator` module drives the connection between a wallet agent and its
//! store-and-forward router (mediator)
//!
//! ## Connection Workflow
//!
//! ```text
//! connect(endpoint)
//! ├── POST {endpoint}/outofband/create-invitation with the router label
//! ├── subscribe to the agent events
//! ├── accept the invitation through the agent out-of-band protocol
//! ├── wait for post_state / completed / didexchange_states of the connection
//! ├── register the connection as the mediator connection
//! ├── query the mediator connection (router not registered is tolerated)
//! └── return a DisconnectHandle
//! ```
//!
//! The completion wait is the only suspension point. It is bounded by
//! [`types::ConnectorOptions::completion_timeout`] and can be cancelled through
//! [`types::MediatorAPI::connect_with_cancel`]
//!
//! ## Error Handling
//!
//! Agent capabilities return [`types::AgentError`], a structured kind. The "router not registered"
//! condition is [`types::AgentError::RouterNotRegistered`], it is never classified by
//! matching error messages
//!
//! - `connect` surfaces `NetworkError`, `ProtocolError`, `Timeout` and `Cancelled`
//! - `reconnect` logs every failure and never propagates
//! - `is_already_connected` maps only the not-registered condition to `false`
pub mod events;
pub mod types;
pub mod usecase;

mod agent;
pub use agent::Agent;

mod handle;
pub use handle::DisconnectHandle;
