//! GitLab identity provider translation.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, ConfigMapNameReference, IdentityProvider, IdentityProviderSpec,
    SecretNameReference, StringSource, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized GitLab identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitLabIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub gitlab: GitLabProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitLabProvider {
    pub url: String,
    pub ca: ConfigMapNameReference,
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: SecretNameReference,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitLabConfig {
    #[serde(default)]
    url: String,
    #[serde(rename = "clientID", default)]
    client_id: String,
    #[serde(default)]
    client_secret: StringSource,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let gitlab: GitLabConfig = decode_payload("GitLab", value)?;
    let name = p.require_name()?;

    let secret_name = format!("{name}-secret");
    let secret = gen_secret(
        &secret_name,
        OAUTH_NAMESPACE,
        gitlab.client_secret.value.as_bytes(),
        SecretType::Literal,
    )?;

    let ca_name = p.ca_config_map_name("gitlab-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::GitLab(GitLabIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "GitLab".to_string(),
        gitlab: GitLabProvider {
            url: gitlab.url,
            ca: ConfigMapNameReference { name: ca_name },
            client_id: gitlab.client_id,
            client_secret: SecretNameReference { name: secret_name },
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![secret],
        config_map: Some(config_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_provider_entry_and_artifacts() {
        let p = IdentityProvider {
            kind: "GitLabIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "gitlab123456789".to_string(),
            use_as_challenger: true,
            use_as_login: true,
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            "url: https://gitlab.com/\nclientID: fake-id\nclientSecret: fake-secret",
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();

        let IdentityProviderSpec::GitLab(idp) = translated.spec else {
            panic!("expected a GitLab provider");
        };
        assert_eq!(idp.name, "gitlab123456789");
        assert_eq!(idp.provider_type, "GitLab");
        assert_eq!(idp.gitlab.url, "https://gitlab.com/");
        assert_eq!(idp.gitlab.ca.name, "gitlab-configmap");
        assert_eq!(idp.gitlab.client_id, "fake-id");
        assert_eq!(idp.gitlab.client_secret.name, "gitlab123456789-secret");

        assert_eq!(translated.secrets.len(), 1);
        assert_eq!(translated.secrets[0].metadata.name, "gitlab123456789-secret");
        assert_eq!(
            translated.config_map.unwrap().metadata.name,
            "gitlab-configmap"
        );
    }
}
