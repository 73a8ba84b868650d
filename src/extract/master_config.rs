//! # Master Configuration
//!
//! Decodes the legacy master configuration document and turns its
//! `oauthConfig` identity providers into translation-ready envelopes.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::transform::oauth::IdentityProvider;

/// Subset of the legacy master configuration this tool consumes
///
/// Everything outside `oauthConfig` is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterConfig {
    #[serde(default)]
    pub oauth_config: Option<OAuthConfig>,
}

/// The `oauthConfig` section of the master configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthConfig {
    #[serde(default)]
    pub identity_providers: Vec<IdentityProviderEntry>,
}

/// One identity provider entry as the legacy format spells it
///
/// The provider-specific fragment stays a generic value here; typing it is
/// the translation layer's job.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "challenge")]
    pub use_as_challenger: bool,
    #[serde(default, rename = "login")]
    pub use_as_login: bool,
    #[serde(default)]
    pub mapping_method: String,
    #[serde(default)]
    pub provider: serde_yaml::Value,
}

/// File-reference fields peeked out of a provider fragment
///
/// Request-header providers spell their CA bundle path `clientCA`; the alias
/// folds it into the same slot.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderStub {
    #[serde(default)]
    api_version: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    file: String,
    #[serde(default, alias = "clientCA")]
    ca: String,
    #[serde(default)]
    cert_file: String,
    #[serde(default)]
    key_file: String,
}

/// Resolves file references from the master configuration against a source
/// root directory.
#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read a referenced file from under the source root.
    ///
    /// Legacy references are absolute paths on the source host, so they are
    /// re-rooted: `/etc/origin/master/ca.crt` resolves to
    /// `<root>/etc/origin/master/ca.crt`. Non-normal path components are
    /// dropped, so a reference cannot escape the root. An empty reference
    /// yields `None` silently; an unreadable one logs a warning and yields
    /// `None`, leaving the artifact payload empty downstream.
    pub async fn resolve(&self, reference: &str) -> Option<Vec<u8>> {
        if reference.is_empty() {
            return None;
        }

        let path = self.rooted(reference);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(
                    "Resolved file reference {} ({} bytes)",
                    path.display(),
                    bytes.len()
                );
                Some(bytes)
            }
            Err(err) => {
                warn!("Could not read referenced file {}: {}", path.display(), err);
                None
            }
        }
    }

    fn rooted(&self, reference: &str) -> PathBuf {
        let mut path = self.root.clone();
        for component in Path::new(reference).components() {
            if let Component::Normal(part) = component {
                path.push(part);
            }
        }
        path
    }
}

/// Read and decode a legacy master configuration file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a valid master
/// configuration document.
pub async fn load_master_config(path: &Path) -> Result<MasterConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read: {}", path.display()))?;

    serde_yaml::from_str(&content).context(format!(
        "Failed to parse master configuration: {}",
        path.display()
    ))
}

/// Build translation-ready provider envelopes from a master configuration.
///
/// Envelopes keep their configuration order. Each provider's file references
/// are resolved through `resolver`, with the providers themselves processed
/// concurrently; an unresolvable reference leaves its payload empty rather
/// than failing the extraction.
///
/// # Errors
///
/// Returns an error when a provider fragment is not a mapping or cannot be
/// re-encoded for the translation layer.
pub async fn extract_identity_providers(
    config: &MasterConfig,
    resolver: &FileResolver,
) -> Result<Vec<IdentityProvider>> {
    if let Some(ref oauth_config) = config.oauth_config {
        let envelopes = oauth_config
            .identity_providers
            .iter()
            .map(|entry| extract_provider(entry, resolver));

        try_join_all(envelopes).await
    } else {
        debug!("Master configuration has no oauthConfig section");
        Ok(Vec::new())
    }
}

async fn extract_provider(
    entry: &IdentityProviderEntry,
    resolver: &FileResolver,
) -> Result<IdentityProvider> {
    let stub: ProviderStub = serde_yaml::from_value(entry.provider.clone()).context(format!(
        "Identity provider \"{}\" carries a malformed provider fragment",
        entry.name
    ))?;

    let payload = serde_json::to_vec(&entry.provider).context(format!(
        "Identity provider \"{}\" fragment cannot be re-encoded",
        entry.name
    ))?;

    let (ht_file_data, ca_data, crt_data, key_data) = tokio::join!(
        resolver.resolve(&stub.file),
        resolver.resolve(&stub.ca),
        resolver.resolve(&stub.cert_file),
        resolver.resolve(&stub.key_file),
    );

    debug!(
        "Extracted identity provider \"{}\" ({})",
        entry.name, stub.kind
    );

    Ok(IdentityProvider {
        kind: stub.kind,
        api_version: stub.api_version,
        mapping_method: entry.mapping_method.clone(),
        name: entry.name.clone(),
        provider: payload,
        ht_file_data,
        ca_data,
        ca_map_name: None,
        crt_data,
        key_data,
        use_as_challenger: entry.use_as_challenger,
        use_as_login: entry.use_as_login,
    })
}
