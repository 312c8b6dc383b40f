//! `identity` is a domain used to glue a wallet agent with its identity collaborators
//! following the `SSI (Self Sovereign Identity)` framework based on `DID Framework`
//!
//! The `identity` domain has four sub-domains:
//!
//! - `mediator`
//! - `did`
//! - `store`
//! - `sds`
//!
//! ---
//!
//! The `mediator` sub-domain drives the `Out-Of-Band` invitation handshake to a store-and-forward
//! router. The wallet agent is not always online, so it needs a router that relays `DIDComm`
//! messages on its behalf. Once the `DID Exchange` reaches its terminal state, the connection
//! is registered as the mediator connection, and can be unregistered, reconnected
//! or checked later
//!
//! ---
//!
//! The `did` sub-domain issues new `DID` accounts through an external `DID` method client. The key
//! sets are generated by an external `KMS`, this crate only sequences the calls and builds the
//! create request. It also keeps the `DID` metadata
//!
//! ---
//!
//! The `store` sub-domain dispatches the verifiable credential and presentation save operations
//! to the local agent storage and to the remote `SDS (Secure Data Store)`
//!
//! ---
//!
//! The `sds` sub-domain contains the session contracts shared by `did` and `store` to decide
//! whether the remote synchronization is enabled and which user owns the data
pub mod did;
pub mod mediator;
pub mod sds;
pub mod store;
