//! LDAP identity provider translation.
//!
//! Attribute mappings are carried through, with empty lists treated as
//! unset. The bind password stays inline in the provider entry; only the
//! CA bundle becomes a separate artifact.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, non_empty_list, ConfigMapNameReference, IdentityProvider, IdentityProviderSpec,
    StringSource, TranslatedProvider,
};

/// Normalized LDAP identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub ldap: LdapProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapProvider {
    pub attributes: LdapAttributes,
    #[serde(rename = "bindDN")]
    pub bind_dn: String,
    pub bind_password: String,
    pub ca: ConfigMapNameReference,
    pub insecure: bool,
    pub url: String,
}

/// Which directory attributes map onto which identity fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Vec<String>>,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LdapConfig {
    #[serde(default)]
    url: String,
    #[serde(rename = "bindDN", default)]
    bind_dn: String,
    #[serde(default)]
    bind_password: StringSource,
    #[serde(default)]
    insecure: bool,
    #[serde(default)]
    attributes: LdapAttributes,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let ldap: LdapConfig = decode_payload("LDAP", value)?;
    let name = p.require_name()?;

    let ca_name = p.ca_config_map_name("ldap-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::Ldap(LdapIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "LDAP".to_string(),
        ldap: LdapProvider {
            attributes: LdapAttributes {
                id: non_empty_list(ldap.attributes.id),
                preferred_username: non_empty_list(ldap.attributes.preferred_username),
                name: non_empty_list(ldap.attributes.name),
                email: non_empty_list(ldap.attributes.email),
            },
            bind_dn: ldap.bind_dn,
            bind_password: ldap.bind_password.value,
            ca: ConfigMapNameReference { name: ca_name },
            insecure: ldap.insecure,
            url: ldap.url,
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: Vec::new(),
        config_map: Some(config_map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_provider_entry_with_inline_bind_password() {
        let p = IdentityProvider {
            kind: "LDAPPasswordIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "my_ldap_provider".to_string(),
            use_as_challenger: true,
            use_as_login: true,
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
attributes:
  id:
  - dn
  email:
  - mail
  name:
  - cn
  preferredUsername:
  - uid
bindDN: "123"
bindPassword: "321"
insecure: false
url: "ldap://ldap.example.com/ou=users,dc=acme,dc=com?uid"
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();

        let IdentityProviderSpec::Ldap(idp) = translated.spec else {
            panic!("expected an LDAP provider");
        };
        assert_eq!(idp.provider_type, "LDAP");
        assert_eq!(idp.ldap.attributes.id, Some(vec!["dn".to_string()]));
        assert_eq!(
            idp.ldap.attributes.preferred_username,
            Some(vec!["uid".to_string()])
        );
        assert_eq!(idp.ldap.attributes.name, Some(vec!["cn".to_string()]));
        assert_eq!(idp.ldap.attributes.email, Some(vec!["mail".to_string()]));
        assert_eq!(idp.ldap.bind_dn, "123");
        assert_eq!(idp.ldap.bind_password, "321");
        assert!(!idp.ldap.insecure);
        assert_eq!(idp.ldap.url, "ldap://ldap.example.com/ou=users,dc=acme,dc=com?uid");
        assert_eq!(idp.ldap.ca.name, "ldap-configmap");

        // no secrets: the bind password is not file-backed material
        assert!(translated.secrets.is_empty());
        let config_map = translated.config_map.unwrap();
        assert_eq!(config_map.metadata.name, "ldap-configmap");
        assert_eq!(config_map.data.ca, "");
    }

    #[test]
    fn test_absent_attribute_lists_stay_absent() {
        let p = IdentityProvider {
            kind: "LDAPPasswordIdentityProvider".to_string(),
            name: "ldap1".to_string(),
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str("url: ldap://ldap.example.com").unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::Ldap(idp) = &translated.spec else {
            panic!("expected an LDAP provider");
        };
        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(!yaml.contains("preferredUsername"));
        assert!(!yaml.contains("email"));
    }

    #[test]
    fn test_empty_attribute_lists_are_omitted() {
        let p = IdentityProvider {
            kind: "LDAPPasswordIdentityProvider".to_string(),
            name: "ldap1".to_string(),
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
url: ldap://ldap.example.com
attributes:
  id: []
  preferredUsername: []
  name: []
  email: []
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::Ldap(idp) = &translated.spec else {
            panic!("expected an LDAP provider");
        };
        assert_eq!(idp.ldap.attributes, LdapAttributes::default());
        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(!yaml.contains("preferredUsername"));
        assert!(!yaml.contains("email"));
    }
}
