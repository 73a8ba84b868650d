//! # Manifest Rendering
//!
//! Serializes a translated bundle into named manifest documents and writes
//! them to disk under an output directory's `manifests/` subdirectory.
//!
//! File names follow a fixed convention so repeated runs produce identical
//! trees: `100_AuthMig-cluster-config-oauth.yaml` for the OAuth resource,
//! `100_AuthMig-cluster-config-secret-<name>.yaml` for secrets and
//! `100_AuthMig-cluster-config-configmap-<name>.yaml` for config maps.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::constants::{MANIFESTS_DIR, MANIFEST_PREFIX};
use crate::error::RenderError;
use crate::transform::ManifestBundle;

/// A named manifest document ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub content: Vec<u8>,
}

/// Serialize the bundle into manifest documents.
///
/// Documents come out in emission order: the OAuth resource first, then
/// every secret, then every config map, each preserving bundle order.
///
/// # Errors
///
/// Returns [`RenderError::Serialization`] when a document cannot be encoded
/// as YAML.
pub fn render(bundle: &ManifestBundle) -> Result<Vec<Manifest>, RenderError> {
    let mut manifests = Vec::with_capacity(1 + bundle.secrets.len() + bundle.config_maps.len());

    let crd = serde_yaml::to_string(&bundle.oauth)?;
    manifests.push(Manifest {
        name: format!("100_{MANIFEST_PREFIX}-config-oauth.yaml"),
        content: crd.into_bytes(),
    });

    for secret in &bundle.secrets {
        let doc = serde_yaml::to_string(secret)?;
        manifests.push(Manifest {
            name: format!(
                "100_{MANIFEST_PREFIX}-config-secret-{}.yaml",
                secret.metadata.name
            ),
            content: doc.into_bytes(),
        });
    }

    for config_map in &bundle.config_maps {
        let doc = serde_yaml::to_string(config_map)?;
        manifests.push(Manifest {
            name: format!(
                "100_{MANIFEST_PREFIX}-config-configmap-{}.yaml",
                config_map.metadata.name
            ),
            content: doc.into_bytes(),
        });
    }

    Ok(manifests)
}

/// Write every manifest under `<output_dir>/manifests/`, creating the
/// directory as needed.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or a file cannot be
/// written.
pub async fn write_manifests(output_dir: &Path, manifests: &[Manifest]) -> Result<()> {
    let manifests_dir = output_dir.join(MANIFESTS_DIR);
    tokio::fs::create_dir_all(&manifests_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create manifests directory {}",
                manifests_dir.display()
            )
        })?;

    for manifest in manifests {
        let path = manifests_dir.join(&manifest.name);
        tokio::fs::write(&path, &manifest.content)
            .await
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        debug!("Wrote manifest {}", path.display());
    }

    info!(
        "Wrote {} manifests to {}",
        manifests.len(),
        manifests_dir.display()
    );
    Ok(())
}
