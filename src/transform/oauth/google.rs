//! Google identity provider translation.
//!
//! Google carries no CA material, so only the literal client secret artifact
//! is produced.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::oauth::{
    decode_payload, non_empty_text, IdentityProvider, IdentityProviderSpec, SecretNameReference,
    StringSource, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized Google identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub google: GoogleProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProvider {
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: SecretNameReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_domain: Option<String>,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleConfig {
    #[serde(rename = "clientID", default)]
    client_id: String,
    #[serde(default)]
    client_secret: StringSource,
    #[serde(default)]
    hosted_domain: Option<String>,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let google: GoogleConfig = decode_payload("Google", value)?;
    let name = p.require_name()?;

    let secret_name = format!("{name}-secret");
    let secret = gen_secret(
        &secret_name,
        OAUTH_NAMESPACE,
        google.client_secret.value.as_bytes(),
        SecretType::Literal,
    )?;

    let spec = IdentityProviderSpec::Google(GoogleIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "Google".to_string(),
        google: GoogleProvider {
            client_id: google.client_id,
            client_secret: SecretNameReference { name: secret_name },
            hosted_domain: non_empty_text(google.hosted_domain),
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![secret],
        config_map: None,
    })
}
