use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::{self, Value};
use rst_common::with_logging::log::{debug, error, info};

use crate::identity::sds::types::{SyncOptions, UserSessionBuilder};
use crate::identity::sds::{self, SyncDecision};

use super::record::build_records;
use super::types::{
    HandlerResponse, LocalSaveRequest, ResponderBuilder, SdsSaveCredentialRequest,
    SdsSavePresentationRequest, SdsStoreClientBuilder, StoreAPI, StoreError,
    VerifiableStoreBuilder, STATUS_CANCELLED, STATUS_SUCCESS,
};

/// `Usecase` is base logic implementation for the [`StoreAPI`]
///
/// A `Usecase` is built for a single credential handler event, its responder answers
/// that event
pub struct Usecase<TLocal, TSds, TSession, TResponder>
where
    TLocal: VerifiableStoreBuilder,
    TSds: SdsStoreClientBuilder,
    TSession: UserSessionBuilder,
    TResponder: ResponderBuilder,
{
    local: TLocal,
    sds: TSds,
    session: TSession,
    responder: TResponder,
    sync: SyncOptions,
}

impl<TLocal, TSds, TSession, TResponder> Usecase<TLocal, TSds, TSession, TResponder>
where
    TLocal: VerifiableStoreBuilder,
    TSds: SdsStoreClientBuilder,
    TSession: UserSessionBuilder,
    TResponder: ResponderBuilder,
{
    pub fn new(
        local: TLocal,
        sds: TSds,
        session: TSession,
        responder: TResponder,
        sync: SyncOptions,
    ) -> Self {
        Self {
            local,
            sds,
            session,
            responder,
            sync,
        }
    }

    async fn sync_decision(&self) -> Result<SyncDecision, StoreError> {
        sds::decide(&self.sync, &self.session)
            .await
            .map_err(|err| StoreError::SdsError(err.to_string()))
    }

    async fn save_records(
        &self,
        name: &str,
        credential: Value,
        is_vc: bool,
    ) -> Result<(), StoreError> {
        let records = build_records(name, credential, is_vc)?;
        for record in records {
            self.save(record.name, record.credential).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl<TLocal, TSds, TSession, TResponder> StoreAPI for Usecase<TLocal, TSds, TSession, TResponder>
where
    TLocal: VerifiableStoreBuilder,
    TSds: SdsStoreClientBuilder,
    TSession: UserSessionBuilder,
    TResponder: ResponderBuilder,
{
    async fn save_credential(
        &self,
        name: String,
        credential: Value,
        is_vc: bool,
    ) -> Result<String, StoreError> {
        let status = match self.save_records(&name, credential, is_vc).await {
            Ok(_) => STATUS_SUCCESS.to_string(),
            Err(err) => err.to_string(),
        };

        info!("[store:save_credential] sending status response with status {}", status);

        self.responder
            .respond(HandlerResponse::new(&status))
            .await?;

        Ok(status)
    }

    async fn save(&self, name: String, vc: Value) -> Result<(), StoreError> {
        let verifiable_credential =
            serde_json::to_string(&vc).map_err(|err| StoreError::JSONError(err.to_string()))?;

        let request = LocalSaveRequest {
            name: name.clone(),
            verifiable_credential,
        };

        self.local.save_credential(request).await.map_err(|err| {
            error!("[store:save] vc save failed for {}: {}", name, err);
            err
        })?;

        debug!("[store:save] successfully saved VC: {}", name);

        match self.sync_decision().await? {
            SyncDecision::Disabled => {
                info!("[store:save] skipping credential storage to SDS, no SDS server URL");
                Ok(())
            }
            SyncDecision::NotLoggedIn => {
                let msg = "unable to save credential to SDS since the user is not logged in";
                error!("[store:save] {}", msg);
                Err(StoreError::NotLoggedIn(msg.to_string()))
            }
            SyncDecision::Enabled(user) => {
                let request = SdsSaveCredentialRequest {
                    name,
                    credential: vc,
                    user_id: user.id,
                };

                self.sds.save_credential(request).await
            }
        }
    }

    async fn save_presentation(&self, name: String, presentation: Value) -> Result<(), StoreError> {
        match self.sync_decision().await? {
            SyncDecision::Disabled => {
                info!("[store:save_presentation] skipping SDS storage, no SDS server URL");
                Ok(())
            }
            SyncDecision::NotLoggedIn => {
                let msg = "unable to save presentation to SDS since the user is not logged in";
                error!("[store:save_presentation] {}", msg);
                Err(StoreError::NotLoggedIn(msg.to_string()))
            }
            SyncDecision::Enabled(user) => {
                let request = SdsSavePresentationRequest {
                    name,
                    presentation,
                    user_id: user.id,
                };

                self.sds.save_presentation(request).await
            }
        }
    }

    async fn cancel(&self) -> Result<(), StoreError> {
        self.responder
            .respond(HandlerResponse::new(STATUS_CANCELLED))
            .await
    }
}
