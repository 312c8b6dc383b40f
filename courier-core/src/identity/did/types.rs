use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

pub const PUBLIC_KEY_ENCODING_JWK: &str = "Jwk";
pub const PURPOSE_GENERAL: &str = "general";
pub const PURPOSE_AUTH: &str = "auth";

/// `DIDError` provides all specific error types relate with the `DID` management
#[derive(Debug, PartialEq, Error, Clone)]
pub enum DIDError {
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("kms error: {0}")]
    KmsError(String),

    #[error("unable to create did: {0}")]
    CreateDIDError(String),

    #[error("unable to save did: {0}")]
    SaveDIDError(String),

    #[error("sds error: {0}")]
    SdsError(String),

    #[error("{0}")]
    NotLoggedIn(String),

    #[error("metadata error: {0}")]
    MetadataError(String),

    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("unknown signature type: {0}")]
    UnknownSignatureType(String),
}

/// `KeyType` is the key algorithm requested by the wallet user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum KeyType {
    Ed25519,
    P256,
}

impl KeyType {
    /// The key type name understood by the external `KMS`
    pub fn kms_key_type(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ED25519",
            KeyType::P256 => "ECDSAP256IEEEP1363",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "Ed25519",
            KeyType::P256 => "P256",
        }
    }
}

impl TryFrom<&str> for KeyType {
    type Error = DIDError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Ed25519" => Ok(KeyType::Ed25519),
            "P256" => Ok(KeyType::P256),
            _ => Err(DIDError::UnknownKeyType(value.to_string())),
        }
    }
}

/// `SignatureType` is the proof suite the generated keys will be used with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum SignatureType {
    Ed25519Signature2018,
    JsonWebSignature2020,
}

impl SignatureType {
    pub fn verification_key_type(&self) -> &'static str {
        match self {
            SignatureType::Ed25519Signature2018 => "Ed25519VerificationKey2018",
            SignatureType::JsonWebSignature2020 => "JwsVerificationKey2020",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureType::Ed25519Signature2018 => "Ed25519Signature2018",
            SignatureType::JsonWebSignature2020 => "JsonWebSignature2020",
        }
    }
}

impl TryFrom<&str> for SignatureType {
    type Error = DIDError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Ed25519Signature2018" => Ok(SignatureType::Ed25519Signature2018),
            "JsonWebSignature2020" => Ok(SignatureType::JsonWebSignature2020),
            _ => Err(DIDError::UnknownSignatureType(value.to_string())),
        }
    }
}

/// `KeySet` is a generated key pair kept by the `KMS`, only its identifier
/// and the public key leave the `KMS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct KeySet {
    #[serde(rename = "keyID")]
    pub key_id: String,

    #[serde(rename = "publicKey")]
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    pub id: String,

    #[serde(rename = "type")]
    pub verification_type: String,

    pub value: String,
    pub encoding: String,
    pub key_type: KeyType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purpose: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recovery: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub update: bool,
}

impl PublicKey {
    fn from_key_set(key_set: KeySet, key_type: KeyType, signature_type: SignatureType) -> Self {
        Self {
            id: key_set.key_id,
            verification_type: signature_type.verification_key_type().to_string(),
            value: key_set.public_key,
            encoding: PUBLIC_KEY_ENCODING_JWK.to_string(),
            key_type,
            purpose: Vec::new(),
            recovery: false,
            update: false,
        }
    }
}

/// `CreateDIDRequest` is the payload submitted to the external `DID` method client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct CreateDIDRequest {
    #[serde(rename = "publicKeys")]
    pub public_keys: Vec<PublicKey>,
}

impl CreateDIDRequest {
    /// `build` assigns the main key to the general and auth purposes, followed by
    /// the recovery and the update keys
    pub fn build(
        key_type: KeyType,
        signature_type: SignatureType,
        main: KeySet,
        recovery: KeySet,
        update: KeySet,
    ) -> Self {
        let mut main_key = PublicKey::from_key_set(main, key_type, signature_type);
        main_key.purpose = vec![PURPOSE_GENERAL.to_string(), PURPOSE_AUTH.to_string()];

        let mut recovery_key = PublicKey::from_key_set(recovery, key_type, signature_type);
        recovery_key.recovery = true;

        let mut update_key = PublicKey::from_key_set(update, key_type, signature_type);
        update_key.update = true;

        Self {
            public_keys: vec![main_key, recovery_key, update_key],
        }
    }
}

/// `SdsSaveDIDRequest` is the payload used to save a `DID` to the remote `SDS`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct SdsSaveDIDRequest {
    pub name: String,

    #[serde(rename = "signType")]
    pub signature_type: SignatureType,

    pub did: String,

    #[serde(rename = "userID")]
    pub user_id: String,
}

/// `DIDMetadata` is free-form metadata attached to a `DID` owned by the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct DIDMetadata {
    pub did: String,
    pub metadata: Value,

    #[serde(with = "ts_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl DIDMetadata {
    pub fn new(did: String, metadata: Value) -> Self {
        Self {
            did,
            metadata,
            updated_at: Utc::now(),
        }
    }
}

impl ToJSON for DIDMetadata {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

/// `DIDAPI` is main entrypoint to communicate with the `DID` domain
#[async_trait]
pub trait DIDAPI {
    /// `create_did` generates three key sets through the `KMS` (main, recovery and update)
    /// and submits them to the external `DID` method client
    async fn create_did(
        &self,
        key_type: KeyType,
        signature_type: SignatureType,
    ) -> Result<String, DIDError>;

    /// `save_did` saves the `DID` to the local verifiable data registry, and to the remote
    /// `SDS` when the synchronization is configured
    async fn save_did(
        &self,
        name: String,
        signature_type: SignatureType,
        did: String,
    ) -> Result<(), DIDError>;

    async fn get_all_did_metadata(&self) -> Result<Vec<DIDMetadata>, DIDError>;
    async fn get_did_metadata(&self, did: String) -> Result<DIDMetadata, DIDError>;
    async fn store_did_metadata(&self, did: String, metadata: Value) -> Result<(), DIDError>;
}

#[async_trait]
pub trait KmsBuilder: Send + Sync {
    async fn create_key_set(&self, kms_key_type: String) -> Result<KeySet, DIDError>;
}

#[async_trait]
pub trait DIDClientBuilder: Send + Sync {
    async fn create_did(&self, request: CreateDIDRequest) -> Result<String, DIDError>;
}

/// `VdrBuilder` saves the `DID` to the agent local verifiable data registry
#[async_trait]
pub trait VdrBuilder: Send + Sync {
    async fn save_did(&self, name: String, did: String) -> Result<(), DIDError>;
}

#[async_trait]
pub trait SdsDIDClientBuilder: Send + Sync {
    async fn save_did(&self, request: SdsSaveDIDRequest) -> Result<(), DIDError>;
}

/// `MetadataRepoBuilder` is a key-value repository of [`DIDMetadata`] keyed by `DID`
///
/// The saved value is the JSON form of [`DIDMetadata`] produced by its [`ToJSON`] impl
#[async_trait]
pub trait MetadataRepoBuilder: Send + Sync {
    async fn save_metadata(&self, did: String, encoded: String) -> Result<(), DIDError>;
    async fn get_metadata(&self, did: String) -> Result<DIDMetadata, DIDError>;
    async fn list_metadata(&self) -> Result<Vec<DIDMetadata>, DIDError>;
}
