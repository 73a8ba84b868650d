//! Request header identity provider translation.
//!
//! Proxy URLs and header-name lists are carried through; the client CA
//! bundle moves into a config map. This kind produces no secrets.

use serde::{Deserialize, Serialize};

use crate::constants::OAUTH_NAMESPACE;
use crate::error::TranslateError;
use crate::transform::configmaps::gen_config_map;
use crate::transform::oauth::{
    decode_payload, non_empty_list, ConfigMapNameReference, IdentityProvider,
    IdentityProviderSpec, TranslatedProvider,
};

/// Normalized request header identity provider entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeaderIdentityProvider {
    pub name: String,
    pub challenge: bool,
    pub login: bool,
    pub mapping_method: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub request_header: RequestHeaderProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeaderProvider {
    #[serde(rename = "challengeURL")]
    pub challenge_url: String,
    #[serde(rename = "loginURL")]
    pub login_url: String,
    pub ca: ConfigMapNameReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_common_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username_headers: Option<Vec<String>>,
}

/// Legacy payload fields consumed by this translator
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestHeaderConfig {
    #[serde(rename = "challengeURL", default)]
    challenge_url: String,
    #[serde(rename = "loginURL", default)]
    login_url: String,
    #[serde(default)]
    client_common_names: Option<Vec<String>>,
    #[serde(default)]
    headers: Option<Vec<String>>,
    #[serde(default)]
    email_headers: Option<Vec<String>>,
    #[serde(default)]
    name_headers: Option<Vec<String>>,
    #[serde(default)]
    preferred_username_headers: Option<Vec<String>>,
}

pub(super) fn translate(
    value: serde_yaml::Value,
    p: &IdentityProvider,
) -> Result<TranslatedProvider, TranslateError> {
    let request_header: RequestHeaderConfig = decode_payload("RequestHeader", value)?;
    let name = p.require_name()?;

    let ca_name = p.ca_config_map_name("requestheader-configmap");
    let config_map = gen_config_map(&ca_name, OAUTH_NAMESPACE, p.ca_bytes())?;

    let spec = IdentityProviderSpec::RequestHeader(RequestHeaderIdentityProvider {
        name: name.to_string(),
        challenge: p.use_as_challenger,
        login: p.use_as_login,
        mapping_method: p.mapping_method.clone(),
        provider_type: "RequestHeader".to_string(),
        request_header: RequestHeaderProvider {
            challenge_url: request_header.challenge_url,
            login_url: request_header.login_url,
            ca: ConfigMapNameReference { name: ca_name },
            client_common_names: non_empty_list(request_header.client_common_names),
            headers: non_empty_list(request_header.headers),
            email_headers: non_empty_list(request_header.email_headers),
            name_headers: non_empty_list(request_header.name_headers),
            preferred_username_headers: non_empty_list(request_header.preferred_username_headers),
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
    fn test_builds_provider_entry_with_header_lists() {
        let p = IdentityProvider {
            kind: "RequestHeaderIdentityProvider".to_string(),
            api_version: "v1".to_string(),
            mapping_method: "claim".to_string(),
            name: "my_request_header_provider".to_string(),
            use_as_challenger: true,
            use_as_login: true,
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
challengeURL: https://example.com
loginURL: https://example.com
clientCommonNames:
- my-auth-proxy
headers:
- X-Remote-User
- SSO-User
emailHeaders:
- X-Remote-User-Email
nameHeaders:
- X-Remote-User-Display-Name
preferredUsernameHeaders:
- X-Remote-User-Login
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();

        let IdentityProviderSpec::RequestHeader(idp) = translated.spec else {
            panic!("expected a request header provider");
        };
        assert_eq!(idp.provider_type, "RequestHeader");
        assert_eq!(idp.request_header.challenge_url, "https://example.com");
        assert_eq!(idp.request_header.login_url, "https://example.com");
        assert_eq!(idp.request_header.ca.name, "requestheader-configmap");
        assert_eq!(
            idp.request_header.client_common_names,
            Some(vec!["my-auth-proxy".to_string()])
        );
        assert_eq!(
            idp.request_header.headers,
            Some(vec!["X-Remote-User".to_string(), "SSO-User".to_string()])
        );
        assert_eq!(
            idp.request_header.email_headers,
            Some(vec!["X-Remote-User-Email".to_string()])
        );
        assert_eq!(
            idp.request_header.name_headers,
            Some(vec!["X-Remote-User-Display-Name".to_string()])
        );
        assert_eq!(
            idp.request_header.preferred_username_headers,
            Some(vec!["X-Remote-User-Login".to_string()])
        );

        assert!(translated.secrets.is_empty());
        assert_eq!(
            translated.config_map.unwrap().metadata.name,
            "requestheader-configmap"
        );
    }

    #[test]
    fn test_url_fields_keep_legacy_capitalization_in_yaml() {
        let p = IdentityProvider {
            kind: "RequestHeaderIdentityProvider".to_string(),
            name: "proxy".to_string(),
            ..IdentityProvider::default()
        };
        let payload =
            serde_yaml::from_str("challengeURL: https://a.example.com\nloginURL: https://b.example.com")
                .unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::RequestHeader(idp) = &translated.spec else {
            panic!("expected a request header provider");
        };
        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(yaml.contains("challengeURL: https://a.example.com"));
        assert!(yaml.contains("loginURL: https://b.example.com"));
    }

    #[test]
    fn test_empty_header_lists_are_omitted() {
        let p = IdentityProvider {
            kind: "RequestHeaderIdentityProvider".to_string(),
            name: "proxy".to_string(),
            ..IdentityProvider::default()
        };
        let payload = serde_yaml::from_str(
            r#"
clientCommonNames: []
headers: []
emailHeaders: []
nameHeaders: []
preferredUsernameHeaders: []
"#,
        )
        .unwrap();

        let translated = translate(payload, &p).unwrap();
        let IdentityProviderSpec::RequestHeader(idp) = &translated.spec else {
            panic!("expected a request header provider");
        };
        assert_eq!(idp.request_header.client_common_names, None);
        assert_eq!(idp.request_header.headers, None);
        assert_eq!(idp.request_header.email_headers, None);
        assert_eq!(idp.request_header.name_headers, None);
        assert_eq!(idp.request_header.preferred_username_headers, None);

        let yaml = serde_yaml::to_string(idp).unwrap();
        assert!(!yaml.contains("Headers"));
        assert!(!yaml.contains("headers:"));
        assert!(!yaml.contains("clientCommonNames"));
    }
}
