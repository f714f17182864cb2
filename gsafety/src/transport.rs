//! Content-safety transport trait and reqwest-based Azure implementation.

use gprovider::{AccessToken, HttpReply, ProviderError, ProviderFuture};
use gprovider::{join_endpoint, post_json_with_bearer};
use reqwest::Client;

use crate::serde_api::AnalyzeTextApiRequest;
use crate::types::DEFAULT_SAFETY_API_VERSION;

pub trait ContentSafetyTransport: Send + Sync + std::fmt::Debug {
    /// Submits `text` for analysis and returns the reply verbatim.
    fn analyze<'a>(
        &'a self,
        text: &'a str,
        token: &'a AccessToken,
    ) -> ProviderFuture<'a, Result<HttpReply, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct AzureContentSafetyHttpTransport {
    client: Client,
    base_url: String,
    api_version: String,
}

impl AzureContentSafetyHttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_version: DEFAULT_SAFETY_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn endpoint(&self) -> String {
        join_endpoint(
            &self.base_url,
            &format!("contentsafety/text:analyze?api-version={}", self.api_version),
        )
    }
}

impl ContentSafetyTransport for AzureContentSafetyHttpTransport {
    fn analyze<'a>(
        &'a self,
        text: &'a str,
        token: &'a AccessToken,
    ) -> ProviderFuture<'a, Result<HttpReply, ProviderError>> {
        Box::pin(async move {
            let body = AnalyzeTextApiRequest::new(text);
            post_json_with_bearer(&self.client, &self.endpoint(), &body, token).await
        })
    }
}
