//! # Transform
//!
//! Turns legacy identity providers into the resources the target cluster
//! consumes: one cluster-scoped OAuth resource plus the Secret and ConfigMap
//! manifests its providers reference.

pub mod configmaps;
pub mod oauth;
pub mod secrets;

use serde::{Deserialize, Serialize};

use crate::error::Diagnostic;

/// Object metadata carried by every generated manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
}

/// Every manifest document the translation produced
///
/// Emission order is fixed: the OAuth resource first, then secrets in
/// provider order, then config maps in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestBundle {
    pub oauth: oauth::OAuthCrd,
    pub secrets: Vec<secrets::Secret>,
    pub config_maps: Vec<configmaps::ConfigMap>,
}

/// Result of translating a provider list
///
/// `diagnostics` records the providers that had to be skipped; an empty list
/// means every provider made it into the bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub bundle: ManifestBundle,
    pub diagnostics: Vec<Diagnostic>,
}
