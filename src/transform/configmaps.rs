//! # ConfigMap Manifests
//!
//! Builder for the CA-bundle ConfigMap manifests referenced by translated
//! identity providers. The bundle text is carried as-is under the `ca` key;
//! an empty bundle is valid and still produces a manifest.

use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::transform::Metadata;

/// Data block of a generated config map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapData {
    pub ca: String,
}

/// A ConfigMap manifest holding one CA bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub data: ConfigMapData,
}

/// Build a config map manifest carrying `ca_data` under the `ca` key.
///
/// # Errors
///
/// Returns [`TranslateError::InvalidArtifact`] when `name` or `namespace` is
/// empty.
pub fn gen_config_map(
    name: &str,
    namespace: &str,
    ca_data: &[u8],
) -> Result<ConfigMap, TranslateError> {
    if name.trim().is_empty() {
        return Err(TranslateError::InvalidArtifact {
            artifact: "config map",
            reason: "name cannot be empty".to_string(),
        });
    }
    if namespace.trim().is_empty() {
        return Err(TranslateError::InvalidArtifact {
            artifact: "config map",
            reason: format!("namespace cannot be empty (config map \"{name}\")"),
        });
    }

    Ok(ConfigMap {
        api_version: "v1".to_string(),
        kind: "ConfigMap".to_string(),
        metadata: Metadata {
            name: name.to_string(),
            namespace: namespace.to_string(),
        },
        data: ConfigMapData {
            ca: String::from_utf8_lossy(ca_data).into_owned(),
        },
    })
}
