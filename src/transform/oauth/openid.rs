//! OpenID Connect identity provider translation.
//!
//! Claim mappings and the authorize/token endpoints are carried through; the
//! inline client secret moves into a literal secret.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::oauth::{
    decode_payload, non_empty_list, IdentityProvider, IdentityProviderSpec, SecretNameReference,
    StringSource, TranslatedProvider,
};
use crate::transform::secrets::{gen_secret, SecretType};

/// Normalized OpenID identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    #[serde(rename = "openID")]
    pub open_id: OpenIdProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdProvider {
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: SecretNameReference,
    pub claims: OpenIdClaims,
    pub urls: OpenIdUrls,
}

/// Which token claims map onto which identity fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Vec<String>>,
}

/// Provider endpoints the target cluster contacts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenIdUrls {
    pub authorize: String,
    pub token: String,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenIdConfig {
    #[serde(rename = "clientID", default)]
    client_id: String,
    #[serde(default)]
    client_secret: StringSource,
    #[serde(default)]
    claims: OpenIdClaims,
    #[serde(default)]
    urls: OpenIdUrls,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let openid: OpenIdConfig = decode_payload("OpenID", value)?;
    let name = p.require_name()?;

    let secret_name = format!("{name}-secret");
    let secret = gen_secret(
        &secret_name,
        OAUTH_NAMESPACE,
        openid.client_secret.value.as_bytes(),
        SecretType::Literal,
    )?;

    let spec = IdentityProviderSpec::OpenId(OpenIdIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "OpenID".to_string(),
        open_id: OpenIdProvider {
            client_id: openid.client_id,
            client_secret: SecretNameReference { name: secret_name },
            claims: OpenIdClaims {
                preferred_username: non_empty_list(openid.claims.preferred_username),
                name: non_empty_list(openid.claims.name),
                email: non_empty_list(openid.claims.email),
            },
            urls: openid.urls,
        },
    });

    Ok(TranslatedProvider {
        spec,
        secrets: vec![secret],
        config_map: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::secrets::SecretData;

    #[test]
    fn test_builds_provider_entry_with_claims_and_urls() {
        let p = IdentityProvider {
            kind: "OpenIDIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "my_openid_connect".to_string(),
            use_as_challenger: false,
            use_as_login: true,
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
clientID: testid
clientSecret:
  value: testsecret
claims:
  id:
  - custom_sub_claim
  preferredUsername:
  - preferred_username
  - email
  name:
  - nickname
  - given_name
  - name
  email:
  - custom_email_claim
  - email
urls:
  authorize: https://myidp.example.com/oauth2/authorize
  token: https://myidp.example.com/oauth2/token
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();

        let IdentityProviderSpec::OpenId(idp) = translated.spec else {
            panic!("expected an OpenID provider");
        };
        assert_eq!(idp.provider_type, "OpenID");
        assert_eq!(idp.open_id.client_id, "testid");
        assert_eq!(idp.open_id.client_secret.name, "my_openid_connect-secret");
        assert_eq!(
            idp.open_id.claims.preferred_username,
            Some(vec!["preferred_username".to_string(), "email".to_string()])
        );
        assert_eq!(
            idp.open_id.claims.name,
            Some(vec![
                "nickname".to_string(),
                "given_name".to_string(),
                "name".to_string()
            ])
        );
        assert_eq!(
            idp.open_id.claims.email,
            Some(vec!["custom_email_claim".to_string(), "email".to_string()])
        );
        assert_eq!(
            idp.open_id.urls.authorize,
            "https://myidp.example.com/oauth2/authorize"
        );
        assert_eq!(idp.open_id.urls.token, "https://myidp.example.com/oauth2/token");

        assert_eq!(translated.secrets.len(), 1);
        assert_eq!(
            translated.secrets[0].metadata.name,
            "my_openid_connect-secret"
        );
        assert!(matches!(
            &translated.secrets[0].data,
            SecretData::Literal { client_secret } if !client_secret.is_empty()
        ));
        assert!(translated.config_map.is_none());
    }

    #[test]
    fn test_provider_key_serializes_as_open_id() {
        let p = IdentityProvider {
            kind: "OpenIDIdentityProvider".to_string(),
            name: "oidc".to_string(),
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str("clientID: id\nclientSecret: sec").unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::OpenId(idp) = &translated.spec else {
            panic!("expected an OpenID provider");
        };
        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(yaml.contains("openID:"));
        assert!(yaml.contains("type: OpenID"));
    }

    #[test]
    fn test_empty_claim_lists_are_omitted() {
        let p = IdentityProvider {
            kind: "OpenIDIdentityProvider".to_string(),
            name: "oidc".to_string(),
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
clientID: id
clientSecret: sec
claims:
  preferredUsername: []
  name: []
  email: []
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::OpenId(idp) = &translated.spec else {
            panic!("expected an OpenID provider");
        };
        assert_eq!(idp.open_id.claims, OpenIdClaims::default());
        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(!yaml.contains("preferredUsername"));
        assert!(!yaml.contains("email"));
    }
}
