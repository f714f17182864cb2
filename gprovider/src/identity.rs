//! Azure identity token sources over reqwest: client-secret and managed identity.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::credentials::validate_scope;
use crate::http::status_line;
use crate::{
    AccessToken, ChainedTokenCredential, ProviderError, ProviderFuture, SecretString,
    TokenCredential,
};

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const IMDS_TOKEN_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2018-02-01";
const APP_SERVICE_API_VERSION: &str = "2019-08-01";

pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const ENV_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const ENV_IDENTITY_ENDPOINT: &str = "IDENTITY_ENDPOINT";
pub const ENV_IDENTITY_HEADER: &str = "IDENTITY_HEADER";

/// OAuth2 client-credentials grant against the Microsoft identity platform.
pub struct ClientSecretCredential {
    http: Client,
    authority_host: String,
    tenant_id: String,
    client_id: String,
    client_secret: SecretString,
}

impl ClientSecretCredential {
    pub fn new(
        http: Client,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let tenant_id = tenant_id.into();
        let client_id = client_id.into();
        let client_secret = SecretString::new(client_secret);

        if tenant_id.trim().is_empty() || client_id.trim().is_empty() {
            return Err(ProviderError::configuration(
                "tenant id and client id must not be empty",
            ));
        }

        if client_secret.is_empty() {
            return Err(ProviderError::configuration(
                "client secret must not be empty",
            ));
        }

        Ok(Self {
            http,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            tenant_id,
            client_id,
            client_secret,
        })
    }

    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into();
        self
    }

    /// Builds from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
    /// Returns `None` unless all three are present.
    pub fn from_lookup<F>(http: Client, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tenant_id = lookup(ENV_TENANT_ID)?;
        let client_id = lookup(ENV_CLIENT_ID)?;
        let client_secret = lookup(ENV_CLIENT_SECRET)?;
        let credential = Self::new(http, tenant_id, client_id, client_secret).ok()?;

        Some(match lookup(ENV_AUTHORITY_HOST) {
            Some(host) => credential.with_authority_host(host),
            None => credential,
        })
    }

    pub(crate) fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("authority_host", &self.authority_host)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .finish()
    }
}

impl TokenCredential for ClientSecretCredential {
    fn name(&self) -> &'static str {
        "client-secret"
    }

    fn get_token<'a>(
        &'a self,
        scope: &'a str,
    ) -> ProviderFuture<'a, Result<AccessToken, ProviderError>> {
        Box::pin(async move {
            validate_scope(scope)?;
            let form = [
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose()),
                ("scope", scope),
                ("grant_type", "client_credentials"),
            ];

            let response = self
                .http
                .post(self.token_url())
                .form(&form)
                .send()
                .await
                .map_err(ProviderError::from_reqwest)?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(ProviderError::from_reqwest)?;
            if !(200..300).contains(&status) {
                return Err(ProviderError::authentication(format!(
                    "token request failed with {}",
                    status_line(status)
                )));
            }

            parse_client_secret_token(&body, SystemTime::now())
        })
    }
}

/// Where a managed identity token is requested from.
#[derive(Debug)]
pub enum ManagedIdentityEndpoint {
    AppService {
        endpoint: String,
        header: SecretString,
    },
    Imds {
        endpoint: String,
    },
}

#[derive(Debug)]
pub struct ManagedIdentityCredential {
    http: Client,
    endpoint: ManagedIdentityEndpoint,
    client_id: Option<String>,
}

impl ManagedIdentityCredential {
    pub fn new(http: Client, endpoint: ManagedIdentityEndpoint) -> Self {
        Self {
            http,
            endpoint,
            client_id: None,
        }
    }

    pub fn imds(http: Client) -> Self {
        Self::new(
            http,
            ManagedIdentityEndpoint::Imds {
                endpoint: IMDS_TOKEN_ENDPOINT.to_string(),
            },
        )
    }

    /// Selects a user-assigned identity.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Uses the App Service identity endpoint when `IDENTITY_ENDPOINT` and
    /// `IDENTITY_HEADER` are present, otherwise the instance metadata service.
    pub fn from_lookup<F>(http: Client, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = match (lookup(ENV_IDENTITY_ENDPOINT), lookup(ENV_IDENTITY_HEADER)) {
            (Some(endpoint), Some(header)) => Self::new(
                http,
                ManagedIdentityEndpoint::AppService {
                    endpoint,
                    header: SecretString::new(header),
                },
            ),
            _ => Self::imds(http),
        };

        match lookup(ENV_CLIENT_ID) {
            Some(client_id) => credential.with_client_id(client_id),
            None => credential,
        }
    }

    pub fn endpoint(&self) -> &ManagedIdentityEndpoint {
        &self.endpoint
    }

    pub(crate) fn query_for(&self, scope: &str) -> Vec<(&'static str, String)> {
        let api_version = match self.endpoint {
            ManagedIdentityEndpoint::AppService { .. } => APP_SERVICE_API_VERSION,
            ManagedIdentityEndpoint::Imds { .. } => IMDS_API_VERSION,
        };

        let mut query = vec![
            ("api-version", api_version.to_string()),
            ("resource", resource_for_scope(scope).to_string()),
        ];
        if let Some(client_id) = &self.client_id {
            query.push(("client_id", client_id.clone()));
        }

        query
    }
}

impl TokenCredential for ManagedIdentityCredential {
    fn name(&self) -> &'static str {
        "managed-identity"
    }

    fn get_token<'a>(
        &'a self,
        scope: &'a str,
    ) -> ProviderFuture<'a, Result<AccessToken, ProviderError>> {
        Box::pin(async move {
            validate_scope(scope)?;
            let query = self.query_for(scope);
            let builder = match &self.endpoint {
                ManagedIdentityEndpoint::AppService { endpoint, header } => self
                    .http
                    .get(endpoint)
                    .header("X-IDENTITY-HEADER", header.expose()),
                ManagedIdentityEndpoint::Imds { endpoint } => {
                    self.http.get(endpoint).header("Metadata", "true")
                }
            };

            let response = builder
                .query(&query)
                .send()
                .await
                .map_err(ProviderError::from_reqwest)?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(ProviderError::from_reqwest)?;
            if !(200..300).contains(&status) {
                return Err(ProviderError::authentication(format!(
                    "managed identity token request failed with {}",
                    status_line(status)
                )));
            }

            parse_managed_identity_token(&body)
        })
    }
}

/// Environment client secret (when configured) followed by managed identity.
pub fn default_credential_chain<F>(http: Client, lookup: F) -> ChainedTokenCredential
where
    F: Fn(&str) -> Option<String>,
{
    let mut chain = ChainedTokenCredential::new();
    if let Some(credential) = ClientSecretCredential::from_lookup(http.clone(), &lookup) {
        chain = chain.with_source(Arc::new(credential));
    }

    chain.with_source(Arc::new(ManagedIdentityCredential::from_lookup(
        http, &lookup,
    )))
}

/// Reads a process environment variable, treating blank values as unset.
pub fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub(crate) fn resource_for_scope(scope: &str) -> &str {
    scope.strip_suffix("/.default").unwrap_or(scope)
}

#[derive(Debug, Deserialize)]
struct ClientSecretTokenBody {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ManagedIdentityTokenBody {
    access_token: String,
    #[serde(default)]
    expires_on: Option<Value>,
}

pub(crate) fn parse_client_secret_token(
    body: &str,
    now: SystemTime,
) -> Result<AccessToken, ProviderError> {
    let parsed: ClientSecretTokenBody = serde_json::from_str(body)
        .map_err(|err| ProviderError::authentication(format!("malformed token response: {err}")))?;

    if parsed.access_token.trim().is_empty() {
        return Err(ProviderError::authentication(
            "token response contained an empty access token",
        ));
    }

    let expires_at = parsed
        .expires_in
        .map(|seconds| now + Duration::from_secs(seconds));
    Ok(AccessToken::new(parsed.access_token, expires_at))
}

pub(crate) fn parse_managed_identity_token(body: &str) -> Result<AccessToken, ProviderError> {
    let parsed: ManagedIdentityTokenBody = serde_json::from_str(body)
        .map_err(|err| ProviderError::authentication(format!("malformed token response: {err}")))?;

    if parsed.access_token.trim().is_empty() {
        return Err(ProviderError::authentication(
            "token response contained an empty access token",
        ));
    }

    // expires_on arrives as epoch seconds, either a number or a numeric string.
    let expires_at = parsed
        .expires_on
        .and_then(|value| match value {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.parse::<u64>().ok(),
            _ => None,
        })
        .map(|seconds| UNIX_EPOCH + Duration::from_secs(seconds));

    Ok(AccessToken::new(parsed.access_token, expires_at))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{COGNITIVE_SERVICES_SCOPE, ProviderErrorKind};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn resource_for_scope_strips_default_suffix() {
        assert_eq!(
            resource_for_scope(COGNITIVE_SERVICES_SCOPE),
            "https://cognitiveservices.azure.com"
        );
        assert_eq!(resource_for_scope("api://custom"), "api://custom");
    }

    #[test]
    fn client_secret_token_parsing_computes_relative_expiry() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let token = parse_client_secret_token(
            r#"{"token_type":"Bearer","expires_in":3599,"access_token":"eyJ0"}"#,
            now,
        )
        .expect("token should parse");

        assert_eq!(token.secret(), "eyJ0");
        assert_eq!(
            token.expires_at,
            Some(UNIX_EPOCH + Duration::from_secs(4_599))
        );
    }

    #[test]
    fn managed_identity_token_parsing_accepts_string_and_number_expiry() {
        let from_string =
            parse_managed_identity_token(r#"{"access_token":"a","expires_on":"1700000000"}"#)
                .expect("string expiry should parse");
        let from_number =
            parse_managed_identity_token(r#"{"access_token":"b","expires_on":1700000000}"#)
                .expect("number expiry should parse");

        let expected = Some(UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        assert_eq!(from_string.expires_at, expected);
        assert_eq!(from_number.expires_at, expected);
    }

    #[test]
    fn malformed_or_empty_token_responses_are_authentication_errors() {
        let malformed = parse_managed_identity_token("<html>").expect_err("must fail");
        assert_eq!(malformed.kind, ProviderErrorKind::Authentication);

        let empty = parse_client_secret_token(r#"{"access_token":" "}"#, SystemTime::now())
            .expect_err("must fail");
        assert_eq!(empty.kind, ProviderErrorKind::Authentication);
    }

    #[test]
    fn client_secret_requires_all_three_variables() {
        let partial = lookup_from(&[(ENV_TENANT_ID, "t"), (ENV_CLIENT_ID, "c")]);
        assert!(ClientSecretCredential::from_lookup(Client::new(), partial).is_none());

        let full = lookup_from(&[
            (ENV_TENANT_ID, "tenant-1"),
            (ENV_CLIENT_ID, "client-1"),
            (ENV_CLIENT_SECRET, "shh"),
        ]);
        let credential =
            ClientSecretCredential::from_lookup(Client::new(), full).expect("should build");
        assert_eq!(
            credential.token_url(),
            "https://login.microsoftonline.com/tenant-1/oauth2/v2.0/token"
        );
        assert!(!format!("{credential:?}").contains("shh"));
    }

    #[test]
    fn managed_identity_prefers_app_service_endpoint_when_configured() {
        let app_service = ManagedIdentityCredential::from_lookup(
            Client::new(),
            lookup_from(&[
                (ENV_IDENTITY_ENDPOINT, "http://localhost:8081/msi/token"),
                (ENV_IDENTITY_HEADER, "header-secret"),
            ]),
        );
        assert!(matches!(
            app_service.endpoint(),
            ManagedIdentityEndpoint::AppService { .. }
        ));
        let query = app_service.query_for(COGNITIVE_SERVICES_SCOPE);
        assert_eq!(query[0], ("api-version", "2019-08-01".to_string()));

        let imds = ManagedIdentityCredential::from_lookup(
            Client::new(),
            lookup_from(&[(ENV_CLIENT_ID, "user-assigned")]),
        );
        assert!(matches!(imds.endpoint(), ManagedIdentityEndpoint::Imds { .. }));
        let query = imds.query_for(COGNITIVE_SERVICES_SCOPE);
        assert_eq!(query[0], ("api-version", "2018-02-01".to_string()));
        assert_eq!(
            query[1],
            ("resource", "https://cognitiveservices.azure.com".to_string())
        );
        assert_eq!(query[2], ("client_id", "user-assigned".to_string()));
    }

    #[test]
    fn default_chain_orders_client_secret_before_managed_identity() {
        let with_secret = default_credential_chain(
            Client::new(),
            lookup_from(&[
                (ENV_TENANT_ID, "t"),
                (ENV_CLIENT_ID, "c"),
                (ENV_CLIENT_SECRET, "s"),
            ]),
        );
        assert_eq!(
            with_secret.source_names(),
            vec!["client-secret", "managed-identity"]
        );

        let without_secret = default_credential_chain(Client::new(), lookup_from(&[]));
        assert_eq!(without_secret.source_names(), vec!["managed-identity"]);
    }
}
