//! `did` is a sub-domain of `identity` which focus to issue and keep the `DID` accounts
//! owned by the wallet
//!
//! This domain will have multiple use cases:
//!
//! - Create a new `DID` through the external `DID` method client
//! - Save the `DID` to the local registry and to the remote `SDS`
//! - Store and load the `DID` metadata
pub mod types;
pub mod usecase;
