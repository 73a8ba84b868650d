//! Basic auth identity provider translation.
//!
//! The legacy remote connection info becomes a URL plus references: the CA
//! bundle moves into a config map and the TLS client cert/key pair becomes
//! two secrets, always emitted together.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, ConfigMapNameReference, IdentityProvider, IdentityProviderSpec,
    SecretNameReference, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized basic auth identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAuthIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub basic_auth: BasicAuthProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAuthProvider {
    pub url: String,
    pub ca: ConfigMapNameReference,
    pub tls_client_cert: SecretNameReference,
    pub tls_client_key: SecretNameReference,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
struct BasicAuthConfig {
    #[serde(default)]
    url: String,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let basic_auth: BasicAuthConfig = decode_payload("BasicAuth", value)?;
    let name = p.require_name()?;

    let cert_secret_name = format!("{name}-client-cert-secret");
    let cert_secret = gen_secret(
        &cert_secret_name,
        OAUTH_NAMESPACE,
        p.crt_data.as_deref().unwrap_or_default(),
        SecretType::BasicAuth,
    )?;

    let key_secret_name = format!("{name}-client-key-secret");
    let key_secret = gen_secret(
        &key_secret_name,
        OAUTH_NAMESPACE,
        p.key_data.as_deref().unwrap_or_default(),
        SecretType::BasicAuth,
    )?;

    let ca_name = p.ca_config_map_name("basicauth-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::BasicAuth(BasicAuthIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "BasicAuth".to_string(),
        basic_auth: BasicAuthProvider {
            url: basic_auth.url,
            ca: ConfigMapNameReference { name: ca_name },
            tls_client_cert: SecretNameReference {
                name: cert_secret_name,
            },
            tls_client_key: SecretNameReference {
                name: key_secret_name,
            },
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![cert_secret, key_secret],
        config_map: Some(config_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::secrets::SecretData;

    fn envelope() -> IdentityProvider {
        IdentityProvider {
            kind: "BasicAuthPasswordIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "my_remote_basic_auth_provider".to_string(),
            use_as_challenger: true,
            use_as_login: true,
            ..IdentityProvider::default()
        }
    }

    fn payload() -> serde_yaml::Value {
        serde_yaml::from_str("url: https://www.example.com/").unwrap()
    }

    #[test]
    fn test_builds_provider_entry_with_paired_references() {
        let translated = translate(payload(), &envelope()).unwrap();

        let IdentityProviderSpec::BasicAuth(idp) = translated.spec else {
            panic!("expected a basic auth provider");
        };
        assert_eq!(idp.name, "my_remote_basic_auth_provider");
        assert!(idp.challenge);
        assert!(idp.login);
        assert_eq!(idp.mapping_method, "claim");
        assert_eq!(idp.provider_type, "BasicAuth");
        assert_eq!(idp.basic_auth.url, "https://www.example.com/");
        assert_eq!(idp.basic_auth.ca.name, "basicauth-configmap");
        assert_eq!(
            idp.basic_auth.tls_client_cert.name,
            "my_remote_basic_auth_provider-client-cert-secret"
        );
        assert_eq!(
            idp.basic_auth.tls_client_key.name,
            "my_remote_basic_auth_provider-client-key-secret"
        );
    }

    #[test]
    fn test_emits_cert_then_key_secret_and_the_ca_config_map() {
        let mut p = envelope();
        p.crt_data = Some(b"CERT".to_vec());
        p.key_data = Some(b"KEY".to_vec());
        p.ca_data = Some(b"CA-BUNDLE".to_vec());

        let translated = translate(payload(), &p).unwrap();

        assert_eq!(translated.secrets.len(), 2);
        assert_eq!(
            translated.secrets[0].metadata.name,
            "my_remote_basic_auth_provider-client-cert-secret"
        );
        assert_eq!(
            translated.secrets[0].data,
            SecretData::BasicAuth {
                basic_auth: "Q0VSVA==".to_string(),
            }
        );
        assert_eq!(
            translated.secrets[1].metadata.name,
            "my_remote_basic_auth_provider-client-key-secret"
        );
        assert_eq!(
            translated.secrets[1].data,
            SecretData::BasicAuth {
                basic_auth: "S0VZ".to_string(),
            }
        );

        let config_map = translated.config_map.unwrap();
        assert_eq!(config_map.metadata.name, "basicauth-configmap");
        assert_eq!(config_map.data.ca, "CA-BUNDLE");
    }

    #[test]
    fn test_missing_cert_material_yields_empty_secrets() {
        let translated = translate(payload(), &envelope()).unwrap();

        for secret in &translated.secrets {
            assert_eq!(
                secret.data,
                SecretData::BasicAuth {
                    basic_auth: String::new(),
                }
            );
        }
        assert_eq!(translated.config_map.unwrap().data.ca, "");
    }
}
