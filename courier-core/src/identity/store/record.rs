use rst_common::standard::serde_json::Value;

use super::types::{CredentialRecord, StoreError};

const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// `credential_type` returns the most specific type of a credential, the last entry
/// of its `type` that is not the generic `VerifiableCredential`
pub fn credential_type(vc: &Value) -> String {
    let specific = match &vc["type"] {
        Value::String(single) => Some(single.to_owned()),
        Value::Array(types) => types
            .iter()
            .filter_map(|item| item.as_str())
            .filter(|item| *item != VERIFIABLE_CREDENTIAL_TYPE)
            .last()
            .map(|item| item.to_string()),
        _ => None,
    };

    specific
        .filter(|item| !item.is_empty())
        .unwrap_or(VERIFIABLE_CREDENTIAL_TYPE.to_string())
}

/// `build_records` expands the given value into named records
///
/// A presentation holding more than one credential produces records named
/// `{name}_{type}_{index}`, index starts from 1
pub fn build_records(
    name: &str,
    credential: Value,
    is_vc: bool,
) -> Result<Vec<CredentialRecord>, StoreError> {
    if is_vc {
        return Ok(vec![CredentialRecord {
            name: name.to_string(),
            credential,
        }]);
    }

    let vcs = match credential.get("verifiableCredential") {
        Some(Value::Array(vcs)) => vcs.to_owned(),
        Some(Value::Null) | None => {
            return Err(StoreError::ValidationError(
                "presentation has no verifiableCredential".to_string(),
            ))
        }
        Some(vc) => vec![vc.to_owned()],
    };

    let use_suffix = vcs.len() > 1;
    let records = vcs
        .into_iter()
        .enumerate()
        .map(|(idx, vc)| {
            let record_name = if use_suffix {
                format!("{}_{}_{}", name, credential_type(&vc), idx + 1)
            } else {
                name.to_string()
            };

            CredentialRecord {
                name: record_name,
                credential: vc,
            }
        })
        .collect();

    Ok(records)
}
