//! HTPasswd identity provider translation.
//!
//! The referenced htpasswd file turns into a secret; the provider entry
//! points at it through `fileData`.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::oauth::{
    decode_payload, IdentityProvider, IdentityProviderSpec, SecretNameReference,
    TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized HTPasswd identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtpasswdIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub htpasswd: HtpasswdProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtpasswdProvider {
    pub file_data: SecretNameReference,
}

/// Legacy payload fields consumed by this translator
///
/// The `file` path itself is resolved during extraction; decoding here only
/// checks the payload is the expected shape.
#[derive(Debug, Default, Deserialize)]
struct HtpasswdConfig {
    #[serde(default)]
    #[allow(dead_code, reason = "file content is resolved during extraction")]
    file: String,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let _htpasswd: HtpasswdConfig = decode_payload("HTPasswd", value)?;
    let name = p.require_name()?;

    let secret_name = format!("{name}-secret");
    let secret = gen_secret(
        &secret_name,
        OAUTH_NAMESPACE,
        p.ht_file_data.as_deref().unwrap_or_default(),
        SecretType::Htpasswd,
    )?;

    let spec = IdentityProviderSpec::Htpasswd(HtpasswdIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "HTPasswd".to_string(),
        htpasswd: HtpasswdProvider {
            file_data: SecretNameReference { name: secret_name },
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![secret],
        config_map: None,
    })
}
