//! `prople-courier-core` provides the core business logic used by a wallet agent to
//! maintain its mediator connection, issue `DID` accounts and persist verifiable
//! credentials to both local and remote stores
//!
//! All non-trivial operations (key generation, DID anchoring, credential signing, encrypted
//! storage synchronization) are delegated to external collaborators defined as traits
//! in each sub-domain
pub mod identity;
