//! Keystone identity provider translation.
//!
//! Mirrors basic auth: the TLS client cert/key pair becomes two secrets
//! emitted together, and the CA bundle moves into a config map.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, ConfigMapNameReference, IdentityProvider, IdentityProviderSpec,
    SecretNameReference, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized Keystone identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoneIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub keystone: KeystoneProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoneProvider {
    pub domain_name: String,
    pub url: String,
    pub ca: ConfigMapNameReference,
    pub tls_client_cert: SecretNameReference,
    pub tls_client_key: SecretNameReference,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeystoneConfig {
    #[serde(default)]
    domain_name: String,
    #[serde(default)]
    url: String,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let keystone: KeystoneConfig = decode_payload("Keystone", value)?;
    let name = p.require_name()?;

    let cert_secret_name = format!("{name}-client-cert-secret");
    let cert_secret = gen_secret(
        &cert_secret_name,
        OAUTH_NAMESPACE,
        p.crt_data.as_deref().unwrap_or_default(),
        SecretType::Keystone,
    )?;

    let key_secret_name = format!("{name}-client-key-secret");
    let key_secret = gen_secret(
        &key_secret_name,
        OAUTH_NAMESPACE,
        p.key_data.as_deref().unwrap_or_default(),
        SecretType::Keystone,
    )?;

    let ca_name = p.ca_config_map_name("keystone-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::Keystone(KeystoneIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "Keystone".to_string(),
        keystone: KeystoneProvider {
            domain_name: keystone.domain_name,
            url: keystone.url,
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

    #[test]
    fn test_builds_provider_entry_with_domain_and_paired_secrets() {
        let p = IdentityProvider {
            kind: "KeystonePasswordIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "my_keystone_provider".to_string(),
            use_as_challenger: true,
            use_as_login: true,
            ..IdentityProvider::default()
        };
        let payload =
            serde_yaml::from_str("domainName: default\nurl: http://fake.url:5000").unwrap();

        let translated = translate(payload, &p).unwrap();

        let IdentityProviderSpec::Keystone(idp) = translated.spec else {
            panic!("expected a Keystone provider");
        };
        assert_eq!(idp.provider_type, "Keystone");
        assert_eq!(idp.keystone.domain_name, "default");
        assert_eq!(idp.keystone.url, "http://fake.url:5000");
        assert_eq!(idp.keystone.ca.name, "keystone-configmap");
        assert_eq!(
            idp.keystone.tls_client_cert.name,
            "my_keystone_provider-client-cert-secret"
        );
        assert_eq!(
            idp.keystone.tls_client_key.name,
            "my_keystone_provider-client-key-secret"
        );

        assert_eq!(translated.secrets.len(), 2);
        assert!(matches!(
            translated.secrets[0].data,
            SecretData::Keystone { .. }
        ));
        assert!(matches!(
            translated.secrets[1].data,
            SecretData::Keystone { .. }
        ));
        assert_eq!(
            translated.config_map.unwrap().metadata.name,
            "keystone-configmap"
        );
    }
}
