//! # Errors
//!
//! Typed errors for the translation pipeline, plus the diagnostics channel
//! that reports identity providers the translation had to skip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for identity provider translation
///
/// Most variants are recoverable per-provider failures: the offending
/// provider is skipped and recorded as a [`Diagnostic`] while the rest of the
/// translation proceeds. [`TranslateError::MalformedPayload`] is the
/// exception and aborts the whole run, since a provider fragment that is not
/// even structured data means the input document is corrupt.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The legacy kind string has no supported mapping
    #[error("unsupported identity provider kind \"{kind}\"")]
    UnsupportedKind { kind: String },

    /// The provider payload did not match the shape its kind requires
    #[error("failed to decode {kind} provider payload: {source}")]
    PayloadDecode {
        kind: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A field the artifact names derive from is empty
    #[error("identity provider \"{name}\": required field `{field}` is empty")]
    MissingField { name: String, field: &'static str },

    /// An artifact builder rejected its inputs
    #[error("invalid {artifact} artifact: {reason}")]
    InvalidArtifact { artifact: &'static str, reason: String },

    /// The raw provider payload is not a structured YAML document
    #[error("identity provider \"{name}\" payload is not valid YAML: {source}")]
    MalformedPayload {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl TranslateError {
    /// Classify this error as a per-provider skip reason.
    ///
    /// Returns `None` for errors that abort the whole translation instead of
    /// skipping a single provider.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            TranslateError::UnsupportedKind { .. } => Some(SkipReason::UnsupportedKind),
            TranslateError::PayloadDecode { .. } => Some(SkipReason::PayloadDecode),
            TranslateError::MissingField { .. } | TranslateError::InvalidArtifact { .. } => {
                Some(SkipReason::Translator)
            }
            TranslateError::MalformedPayload { .. } => None,
        }
    }
}

/// Error type for manifest rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize manifest document: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// Why an identity provider was dropped from the translated bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Kind string not in the supported set
    UnsupportedKind,
    /// Payload failed the kind-typed decode
    PayloadDecode,
    /// A translator invariant failed
    Translator,
}

/// Record of one identity provider the translation skipped
///
/// `index` is the provider's position in the source list, so callers can
/// correlate the record with their input even when names repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub index: usize,
    pub name: String,
    pub reason: SkipReason,
    pub message: String,
}
