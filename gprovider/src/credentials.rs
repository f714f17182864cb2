//! Bearer-token credentials: secret handling, the credential contract, and
//! static and chained sources.
//!
//! Tokens are acquired per request and never cached, logged, or persisted.

use std::sync::Arc;
use std::time::SystemTime;

use crate::{ProviderError, ProviderFuture};

/// Default audience for Azure AI services tokens.
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// A short-lived bearer credential for one outbound request.
pub struct AccessToken {
    secret: SecretString,
    pub expires_at: Option<SystemTime>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: Option<SystemTime>) -> Self {
        Self {
            secret: SecretString::new(token),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        self.secret.expose()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies bearer tokens for a requested scope.
pub trait TokenCredential: Send + Sync {
    /// Short label used in diagnostics and chained-credential errors.
    fn name(&self) -> &'static str;

    fn get_token<'a>(&'a self, scope: &'a str)
    -> ProviderFuture<'a, Result<AccessToken, ProviderError>>;
}

pub(crate) fn validate_scope(scope: &str) -> Result<(), ProviderError> {
    if scope.trim().is_empty() {
        return Err(ProviderError::authentication("token scope must not be empty"));
    }

    Ok(())
}

/// Fixed token source for local development and tests.
pub struct StaticTokenCredential {
    token: SecretString,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Result<Self, ProviderError> {
        let token = SecretString::new(token);
        if token.is_empty() {
            return Err(ProviderError::authentication("static token must not be empty"));
        }

        Ok(Self { token })
    }
}

impl std::fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenCredential")
            .field("token", &self.token)
            .finish()
    }
}

impl TokenCredential for StaticTokenCredential {
    fn name(&self) -> &'static str {
        "static"
    }

    fn get_token<'a>(
        &'a self,
        scope: &'a str,
    ) -> ProviderFuture<'a, Result<AccessToken, ProviderError>> {
        Box::pin(async move {
            validate_scope(scope)?;
            Ok(AccessToken::new(self.token.expose(), None))
        })
    }
}

/// Tries each source in order and returns the first token obtained.
#[derive(Default, Clone)]
pub struct ChainedTokenCredential {
    sources: Vec<Arc<dyn TokenCredential>>,
}

impl ChainedTokenCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: Arc<dyn TokenCredential>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.name()).collect()
    }
}

impl TokenCredential for ChainedTokenCredential {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn get_token<'a>(
        &'a self,
        scope: &'a str,
    ) -> ProviderFuture<'a, Result<AccessToken, ProviderError>> {
        Box::pin(async move {
            validate_scope(scope)?;
            if self.sources.is_empty() {
                return Err(ProviderError::configuration(
                    "credential chain has no sources",
                ));
            }

            let mut failures = Vec::with_capacity(self.sources.len());
            for source in &self.sources {
                match source.get_token(scope).await {
                    Ok(token) => {
                        tracing::debug!(
                            phase = "credential",
                            event = "token_acquired",
                            source = source.name()
                        );
                        return Ok(token);
                    }
                    Err(error) => {
                        tracing::debug!(
                            phase = "credential",
                            event = "source_failed",
                            source = source.name(),
                            error_kind = ?error.kind
                        );
                        failures.push(format!("{}: {}", source.name(), error.message));
                    }
                }
            }

            Err(ProviderError::authentication(format!(
                "no credential source produced a token ({})",
                failures.join("; ")
            )))
        })
    }
}
