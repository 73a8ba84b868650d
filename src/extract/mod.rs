//! # Extraction
//!
//! Pulls identity providers out of a legacy OpenShift 3 master configuration.
//!
//! Extraction is the filesystem half of the pipeline: it decodes the master
//! configuration document, keeps each provider's config fragment as raw
//! bytes, and resolves the file references the fragment carries (htpasswd
//! files, CA bundles, TLS client cert/key pairs) into memory. The result is
//! a list of [`IdentityProvider`](crate::transform::oauth::IdentityProvider)
//! envelopes the translation layer consumes without touching the disk.

pub mod master_config;

// Re-export public API
pub use master_config::{
    extract_identity_providers, load_master_config, FileResolver, MasterConfig,
};
