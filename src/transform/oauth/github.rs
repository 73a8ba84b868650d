//! GitHub identity provider translation.
//!
//! The inline client secret moves into a literal secret; organization and
//! team restrictions are carried through, and stay absent when the source
//! left them unset or empty.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, non_empty_list, non_empty_text, ConfigMapNameReference, IdentityProvider,
    IdentityProviderSpec, SecretNameReference, StringSource, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized GitHub identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub github: GitHubProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubProvider {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub ca: ConfigMapNameReference,
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: SecretNameReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubConfig {
    #[serde(rename = "clientID", default)]
    client_id: String,
    #[serde(default)]
    client_secret: StringSource,
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default)]
    organizations: Option<Vec<String>>,
    #[serde(default)]
    teams: Option<Vec<String>>,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let github: GitHubConfig = decode_payload("GitHub", value)?;
    let name = p.require_name()?;

    let secret_name = format!("{name}-secret");
    let secret = gen_secret(
        &secret_name,
        OAUTH_NAMESPACE,
        github.client_secret.value.as_bytes(),
        SecretType::Literal,
    )?;

    let ca_name = p.ca_config_map_name("github-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::GitHub(GitHubIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "GitHub".to_string(),
        github: GitHubProvider {
            hostname: non_empty_text(github.hostname),
            ca: ConfigMapNameReference { name: ca_name },
            client_id: github.client_id,
            client_secret: SecretNameReference { name: secret_name },
            organizations: non_empty_list(github.organizations),
            teams: non_empty_list(github.teams),
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![secret],
        config_map: Some(config_map),
    })
}
