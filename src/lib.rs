//! AuthMig Library
//!
//! Core functionality for translating the OAuth section of a legacy
//! OpenShift 3 master configuration into OpenShift 4 manifests.
//! Tests are included in the module files and under tests/.

// Re-export modules so they can be tested
pub mod cli;
pub mod constants;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod transform;

// Re-export the pipeline's public API
pub use error::{Diagnostic, RenderError, SkipReason, TranslateError};
pub use extract::{extract_identity_providers, load_master_config, FileResolver, MasterConfig};
pub use manifest::{render, write_manifests, Manifest};
pub use transform::oauth::{translate, IdentityProvider, OAuthCrd};
pub use transform::{ManifestBundle, TranslationOutcome};
