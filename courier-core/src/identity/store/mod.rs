//! `store` is a sub-domain of `identity` used to dispatch the verifiable credential
//! and presentation save operations
//!
//! A credential is always saved to the agent local store first, and then to the remote
//! `SDS` when it is configured. A presentation is only saved to the remote `SDS`
pub mod record;
pub mod types;
pub mod usecase;
