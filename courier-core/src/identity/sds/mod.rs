//! `sds` contains the contracts used to synchronize the wallet data to the remote
//! `SDS (Secure Data Store)`
//!
//! The remote synchronization is enabled only when a server url is configured, and
//! needs a registered (logged in) user which owns the remote data
pub mod types;

use rst_common::with_logging::log::debug;

use types::{RegisteredUser, SessionError, SyncOptions, UserSessionBuilder};

/// `SyncDecision` is the outcome of checking whether a remote save should happen
#[derive(Debug, Clone, PartialEq)]
pub enum SyncDecision {
    Disabled,
    NotLoggedIn,
    Enabled(RegisteredUser),
}

/// `decide` checks the sync options first, the session is queried only when the
/// synchronization is enabled
pub async fn decide<TSession>(
    options: &SyncOptions,
    session: &TSession,
) -> Result<SyncDecision, SessionError>
where
    TSession: UserSessionBuilder,
{
    if !options.is_enabled() {
        return Ok(SyncDecision::Disabled);
    }

    match session.registered_user().await? {
        Some(user) => {
            debug!("[sds:decide] registered user: {}", user.id);
            Ok(SyncDecision::Enabled(user))
        }
        None => Ok(SyncDecision::NotLoggedIn),
    }
}
