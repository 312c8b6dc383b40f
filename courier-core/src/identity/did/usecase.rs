use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, error, info};

use rstdev_domain::entity::ToJSON;

use crate::identity::sds::types::{SyncOptions, UserSessionBuilder};
use crate::identity::sds::{self, SyncDecision};

use super::types::{
    CreateDIDRequest, DIDClientBuilder, DIDError, DIDMetadata, KeyType, KmsBuilder,
    MetadataRepoBuilder, SdsDIDClientBuilder, SdsSaveDIDRequest, SignatureType, VdrBuilder, DIDAPI,
};

/// `Usecase` is base logic implementation for the [`DIDAPI`]
///
/// The `KMS`, the `DID` method client, the local registry and the remote `SDS` client are all
/// external collaborators, this object only sequences their calls
pub struct Usecase<TKms, TDIDClient, TVdr, TSds, TSession, TRepo>
where
    TKms: KmsBuilder,
    TDIDClient: DIDClientBuilder,
    TVdr: VdrBuilder,
    TSds: SdsDIDClientBuilder,
    TSession: UserSessionBuilder,
    TRepo: MetadataRepoBuilder,
{
    kms: TKms,
    did_client: TDIDClient,
    vdr: TVdr,
    sds: TSds,
    session: TSession,
    repo: TRepo,
    sync: SyncOptions,
}

impl<TKms, TDIDClient, TVdr, TSds, TSession, TRepo>
    Usecase<TKms, TDIDClient, TVdr, TSds, TSession, TRepo>
where
    TKms: KmsBuilder,
    TDIDClient: DIDClientBuilder,
    TVdr: VdrBuilder,
    TSds: SdsDIDClientBuilder,
    TSession: UserSessionBuilder,
    TRepo: MetadataRepoBuilder,
{
    pub fn new(
        kms: TKms,
        did_client: TDIDClient,
        vdr: TVdr,
        sds: TSds,
        session: TSession,
        repo: TRepo,
        sync: SyncOptions,
    ) -> Self {
        Self {
            kms,
            did_client,
            vdr,
            sds,
            session,
            repo,
            sync,
        }
    }
}

#[async_trait]
impl<TKms, TDIDClient, TVdr, TSds, TSession, TRepo> DIDAPI
    for Usecase<TKms, TDIDClient, TVdr, TSds, TSession, TRepo>
where
    TKms: KmsBuilder,
    TDIDClient: DIDClientBuilder,
    TVdr: VdrBuilder,
    TSds: SdsDIDClientBuilder,
    TSession: UserSessionBuilder,
    TRepo: MetadataRepoBuilder,
{
    async fn create_did(
        &self,
        key_type: KeyType,
        signature_type: SignatureType,
    ) -> Result<String, DIDError> {
        let kms_key_type = key_type.kms_key_type().to_string();

        let main = self.kms.create_key_set(kms_key_type.clone()).await?;
        let recovery = self.kms.create_key_set(kms_key_type.clone()).await?;
        let update = self.kms.create_key_set(kms_key_type).await?;

        let request = CreateDIDRequest::build(key_type, signature_type, main, recovery, update);
        let did = self
            .did_client
            .create_did(request)
            .await
            .map_err(|err| {
                error!("[did:create] failed to create did: {}", err);
                err
            })?;

        debug!("[did:create] did created: {}", did);
        Ok(did)
    }

    async fn save_did(
        &self,
        name: String,
        signature_type: SignatureType,
        did: String,
    ) -> Result<(), DIDError> {
        if name.is_empty() {
            return Err(DIDError::ValidationError("name was missing".to_string()));
        }

        if did.is_empty() {
            return Err(DIDError::ValidationError("did was missing".to_string()));
        }

        self.vdr.save_did(name.clone(), did.clone()).await?;

        let decision = sds::decide(&self.sync, &self.session)
            .await
            .map_err(|err| DIDError::SdsError(err.to_string()))?;

        match decision {
            SyncDecision::Disabled => {
                info!("[did:save] skipping DID storage to SDS, no SDS server URL");
                Ok(())
            }
            SyncDecision::NotLoggedIn => {
                let msg = "unable to save DID to SDS since the user is not logged in";
                error!("[did:save] {}", msg);
                Err(DIDError::NotLoggedIn(msg.to_string()))
            }
            SyncDecision::Enabled(user) => {
                let request = SdsSaveDIDRequest {
                    name,
                    signature_type,
                    did,
                    user_id: user.id,
                };

                self.sds.save_did(request).await
            }
        }
    }

    async fn get_all_did_metadata(&self) -> Result<Vec<DIDMetadata>, DIDError> {
        self.repo.list_metadata().await
    }

    async fn get_did_metadata(&self, did: String) -> Result<DIDMetadata, DIDError> {
        self.repo.get_metadata(did).await
    }

    async fn store_did_metadata(&self, did: String, metadata: Value) -> Result<(), DIDError> {
        if did.is_empty() {
            return Err(DIDError::ValidationError("did was missing".to_string()));
        }

        let encoded = DIDMetadata::new(did.clone(), metadata)
            .to_json()
            .map_err(|err| DIDError::MetadataError(err.to_string()))?;

        self.repo.save_metadata(did, encoded).await
    }
}
