//! # OAuth Translation
//!
//! Translates legacy identity providers into the cluster OAuth resource and
//! its companion artifacts.
//!
//! Each supported legacy kind has its own translator module; [`translate`]
//! decodes every provider's payload, dispatches on the kind string, and
//! assembles the results into a [`ManifestBundle`] in input order. Providers
//! that cannot be translated are skipped and reported through the
//! [`Diagnostic`] channel instead of failing the run.

pub mod basic_auth;
pub mod github;
pub mod gitlab;
pub mod google;
pub mod htpasswd;
pub mod keystone;
pub mod ldap;
pub mod openid;
pub mod request_header;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use basic_auth::BasicAuthIdentityProvider;
pub use github::GitHubIdentityProvider;
pub use gitlab::GitLabIdentityProvider;
pub use google::GoogleIdentityProvider;
pub use htpasswd::HtpasswdIdentityProvider;
pub use keystone::KeystoneIdentityProvider;
pub use ldap::LdapIdentityProvider;
pub use openid::OpenIdIdentityProvider;
pub use request_header::RequestHeaderIdentityProvider;

use crate::constants::{API_VERSION, OAUTH_KIND, OAUTH_NAMESPACE, OAUTH_RESOURCE_NAME};
use crate::error::{Diagnostic, TranslateError};
use crate::transform::configmaps::ConfigMap;
use crate::transform::secrets::Secret;
use crate::transform::{ManifestBundle, Metadata, TranslationOutcome};

/// A legacy identity provider ready for translation
///
/// `provider` carries the provider-specific config fragment as raw bytes
/// (JSON or YAML; both decode the same way). The `*_data` fields hold file
/// contents already resolved by extraction; translators treat a missing one
/// as empty. `ca_map_name` is set when the source already names a CA config
/// map, in which case translators reuse that name instead of synthesizing
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityProvider {
    pub kind: String,
    pub api_version: String,
    pub mapping_method: String,
    pub name: String,
    pub provider: Vec<u8>,
    pub ht_file_data: Option<Vec<u8>>,
    pub ca_data: Option<Vec<u8>>,
    pub ca_map_name: Option<String>,
    pub crt_data: Option<Vec<u8>>,
    pub key_data: Option<Vec<u8>>,
    pub use_as_challenger: bool,
    pub use_as_login: bool,
}

impl IdentityProvider {
    /// Parse the raw provider fragment into a generic YAML value.
    ///
    /// Failure here means the input document itself is corrupt, so the error
    /// is fatal rather than a per-provider skip.
    fn parse_payload(&self) -> Result<serde_yaml::Value, TranslateError> {
        serde_yaml::from_slice(&self.provider).map_err(|source| {
            TranslateError::MalformedPayload {
                name: self.name.clone(),
                source,
            }
        })
    }

    /// Provider name, validated non-empty because every artifact name
    /// derives from it.
    pub(crate) fn require_name(&self) -> Result<&str, TranslateError> {
        if self.name.trim().is_empty() {
            return Err(TranslateError::MissingField {
                name: self.name.clone(),
                field: "name",
            });
        }
        Ok(&self.name)
    }

    /// CA config map name for this provider: a pre-named map wins over the
    /// kind's synthesized default.
    pub(crate) fn ca_config_map_name(&self, default_name: &str) -> String {
        self.ca_map_name
            .clone()
            .unwrap_or_else(|| default_name.to_string())
    }

    pub(crate) fn ca_bytes(&self) -> &[u8] {
        self.ca_data.as_deref().unwrap_or_default()
    }
}

/// Supported legacy identity provider kinds, plus a catch-all for everything
/// else
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    BasicAuth,
    GitHub,
    GitLab,
    Google,
    Htpasswd,
    Keystone,
    Ldap,
    OpenId,
    RequestHeader,
    Unknown(String),
}

impl ProviderKind {
    /// Map a legacy kind string onto the dispatch table.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "BasicAuthPasswordIdentityProvider" => ProviderKind::BasicAuth,
            "GitHubIdentityProvider" => ProviderKind::GitHub,
            "GitLabIdentityProvider" => ProviderKind::GitLab,
            "GoogleIdentityProvider" => ProviderKind::Google,
            "HTPasswdPasswordIdentityProvider" => ProviderKind::Htpasswd,
            "KeystonePasswordIdentityProvider" => ProviderKind::Keystone,
            "LDAPPasswordIdentityProvider" => ProviderKind::Ldap,
            "OpenIDIdentityProvider" => ProviderKind::OpenId,
            "RequestHeaderIdentityProvider" => ProviderKind::RequestHeader,
            other => ProviderKind::Unknown(other.to_string()),
        }
    }

    /// The `type` value written into the provider's manifest entry.
    pub fn type_name(&self) -> &str {
        match self {
            ProviderKind::BasicAuth => "BasicAuth",
            ProviderKind::GitHub => "GitHub",
            ProviderKind::GitLab => "GitLab",
            ProviderKind::Google => "Google",
            ProviderKind::Htpasswd => "HTPasswd",
            ProviderKind::Keystone => "Keystone",
            ProviderKind::Ldap => "LDAP",
            ProviderKind::OpenId => "OpenID",
            ProviderKind::RequestHeader => "RequestHeader",
            ProviderKind::Unknown(kind) => kind,
        }
    }
}

/// A secret value in a legacy config: either a bare string or a map with a
/// `value` key
///
/// The legacy format also allows `env`/`file` indirection keys in the map
/// form; those are ignored here, matching how the source cluster's inline
/// values migrate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSource {
    pub value: String,
}

impl<'de> Deserialize<'de> for StringSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{IgnoredAny, MapAccess, Visitor};
        use std::fmt;

        struct StringSourceVisitor;

        impl<'de> Visitor<'de> for StringSourceVisitor {
            type Value = StringSource;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a map with a `value` key")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(StringSource {
                    value: v.to_string(),
                })
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(StringSource::default())
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut value = String::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "value" {
                        value = map.next_value()?;
                    } else {
                        let _: IgnoredAny = map.next_value()?;
                    }
                }
                Ok(StringSource { value })
            }
        }

        deserializer.deserialize_any(StringSourceVisitor)
    }
}

/// Reference to a generated secret by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretNameReference {
    pub name: String,
}

/// Reference to a generated config map by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapNameReference {
    pub name: String,
}

/// The cluster OAuth resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCrd {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: OAuthSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthSpec {
    pub identity_providers: Vec<IdentityProviderSpec>,
}

impl OAuthCrd {
    /// An empty OAuth resource with the fixed identity every translation
    /// produces.
    pub fn new() -> Self {
        OAuthCrd {
            api_version: API_VERSION.to_string(),
            kind: OAUTH_KIND.to_string(),
            metadata: Metadata {
                name: OAUTH_RESOURCE_NAME.to_string(),
                namespace: OAUTH_NAMESPACE.to_string(),
            },
            spec: OAuthSpec::default(),
        }
    }
}

impl Default for OAuthCrd {
    fn default() -> Self {
        Self::new()
    }
}

/// One translated identity provider entry in the OAuth spec
///
/// Untagged: each variant serializes as its inner struct, whose `type` field
/// carries the discriminator the cluster expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdentityProviderSpec {
    BasicAuth(BasicAuthIdentityProvider),
    GitHub(GitHubIdentityProvider),
    GitLab(GitLabIdentityProvider),
    Google(GoogleIdentityProvider),
    Htpasswd(HtpasswdIdentityProvider),
    Keystone(KeystoneIdentityProvider),
    Ldap(LdapIdentityProvider),
    OpenId(OpenIdIdentityProvider),
    RequestHeader(RequestHeaderIdentityProvider),
}

/// Product of one per-kind translator
#[derive(Debug)]
pub(crate) struct TranslatedProvider {
    pub spec: IdentityProviderSpec,
    pub secrets: Vec<Secret>,
    pub config_map: Option<ConfigMap>,
}

/// Decode a provider payload into the typed shape its kind requires.
pub(crate) fn decode_payload<T>(kind: &str, value: serde_yaml::Value) -> Result<T, TranslateError>
where
    T: serde::de::DeserializeOwned,
{
    serde_yaml::from_value(value).map_err(|source| TranslateError::PayloadDecode {
        kind: kind.to_string(),
        source,
    })
}

/// A present-but-empty legacy list is carried as absent.
pub(crate) fn non_empty_list<T>(list: Option<Vec<T>>) -> Option<Vec<T>> {
    list.filter(|items| !items.is_empty())
}

/// A present-but-empty legacy string is carried as absent.
pub(crate) fn non_empty_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn translate_provider(
    kind: &ProviderKind,
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    match kind {
        ProviderKind::BasicAuth => basic_auth::translate(value, p),
        ProviderKind::GitHub => github::translate(value, p),
        ProviderKind::GitLab => gitlab::translate(value, p),
        ProviderKind::Google => google::translate(value, p),
        ProviderKind::Htpasswd => htpasswd::translate(value, p),
        ProviderKind::Keystone => keystone::translate(value, p),
        ProviderKind::Ldap => ldap::translate(value, p),
        ProviderKind::OpenId => openid::translate(value, p),
        ProviderKind::RequestHeader => request_header::translate(value, p),
        ProviderKind::Unknown(kind) => Err(TranslateError::UnsupportedKind { kind: kind.clone() }),
    }
}

/// Translate legacy identity providers into the cluster OAuth resource and
/// its companion Secret/ConfigMap artifacts.
///
/// Providers appear in the output in input order. A provider that cannot be
/// translated (unsupported kind, payload that fails its kind's typed decode,
/// or a translator invariant failure) is skipped atomically: none of its
/// artifacts are emitted and a [`Diagnostic`] records why.
///
/// # Errors
///
/// Returns [`TranslateError::MalformedPayload`] when a provider fragment is
/// not structured data at all; that means the input document is corrupt and
/// no partial output is produced.
pub fn translate(
    identity_providers: &[IdentityProvider],
) -> Result<TranslationOutcome, TranslateError> {
    let mut crd = OAuthCrd::new();
    let mut secrets: Vec<Secret> = Vec::new();
    let mut config_maps: Vec<ConfigMap> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for (index, p) in identity_providers.iter().enumerate() {
        let kind = ProviderKind::from_kind(&p.kind);
        let value = p.parse_payload()?;

        match translate_provider(&kind, value, p) {
            Ok(translated) => {
                debug!(
                    "Translated {} identity provider \"{}\"",
                    kind.type_name(),
                    p.name
                );
                crd.spec.identity_providers.push(translated.spec);
                secrets.extend(translated.secrets);
                config_maps.extend(translated.config_map);
            }
            Err(err) => match err.skip_reason() {
                Some(reason) => {
                    warn!(
                        "Skipping identity provider \"{}\" at index {}: {}",
                        p.name, index, err
                    );
                    diagnostics.push(Diagnostic {
                        index,
                        name: p.name.clone(),
                        reason,
                        message: err.to_string(),
                    });
                }
                None => return Err(err),
            },
        }
    }

    info!(
        "Translated {} of {} identity providers",
        crd.spec.identity_providers.len(),
        identity_providers.len()
    );

    Ok(TranslationOutcome {
        bundle: ManifestBundle {
            oauth: crd,
            secrets,
            config_maps,
        },
        diagnostics,
    })
}
