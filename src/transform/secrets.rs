//! # Secret Manifests
//!
//! Builder for the Opaque Secret manifests referenced by translated identity
//! providers. Secret values are always base64-encoded, whatever payload
//! variant they carry.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::transform::Metadata;

/// Payload variant a generated secret carries
///
/// Selects the single key the secret's `data` block is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretType {
    /// OAuth client secret (`clientSecret` key)
    Literal,
    /// htpasswd file contents (`htpasswd` key)
    Htpasswd,
    /// Keystone TLS client certificate or key (`keystone` key)
    Keystone,
    /// Basic auth TLS client certificate or key (`basicAuth` key)
    BasicAuth,
}

/// Data block of a generated secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecretData {
    Literal {
        #[serde(rename = "clientSecret")]
        client_secret: String,
    },
    Htpasswd {
        htpasswd: String,
    },
    Keystone {
        keystone: String,
    },
    BasicAuth {
        #[serde(rename = "basicAuth")]
        basic_auth: String,
    },
}

/// An Opaque Secret manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub secret_type: String,
    pub metadata: Metadata,
    pub data: SecretData,
}

/// Build a secret manifest carrying `content` base64-encoded under the data
/// key `secret_type` selects.
///
/// # Errors
///
/// Returns [`TranslateError::InvalidArtifact`] when `name` or `namespace` is
/// empty.
pub fn gen_secret(
    name: &str,
    namespace: &str,
    content: &[u8],
    secret_type: SecretType,
) -> Result<Secret, TranslateError> {
    if name.trim().is_empty() {
        return Err(TranslateError::InvalidArtifact {
            artifact: "secret",
            reason: "name cannot be empty".to_string(),
        });
    }
    if namespace.trim().is_empty() {
        return Err(TranslateError::InvalidArtifact {
            artifact: "secret",
            reason: format!("namespace cannot be empty (secret \"{name}\")"),
        });
    }

    let encoded = general_purpose::STANDARD.encode(content);
    let data = match secret_type {
        SecretType::Literal => SecretData::Literal {
            client_secret: encoded,
        },
        SecretType::Htpasswd => SecretData::Htpasswd { htpasswd: encoded },
        SecretType::Keystone => SecretData::Keystone { keystone: encoded },
        SecretType::BasicAuth => SecretData::BasicAuth { basic_auth: encoded },
    };

    Ok(Secret {
        api_version: "v1".to_string(),
        kind: "Secret".to_string(),
        secret_type: "Opaque".to_string(),
        metadata: Metadata {
            name: name.to_string(),
            namespace: namespace.to_string(),
        },
        data,
    })
}
