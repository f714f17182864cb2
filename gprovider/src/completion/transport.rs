//! Completion transport trait and reqwest-based Azure OpenAI implementation.

use reqwest::Client;

use crate::http::{HttpReply, join_endpoint, post_json_with_bearer};
use crate::{AccessToken, ProviderError, ProviderFuture};

use super::serde_api::build_api_request;
use super::types::{CompletionRequest, DEFAULT_COMPLETION_API_VERSION, DEFAULT_DEPLOYMENT};

pub trait CompletionTransport: Send + Sync + std::fmt::Debug {
    /// Sends one request and returns the reply verbatim, whatever its status.
    fn send<'a>(
        &'a self,
        request: &'a CompletionRequest,
        token: &'a AccessToken,
    ) -> ProviderFuture<'a, Result<HttpReply, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct AzureOpenAiHttpTransport {
    client: Client,
    base_url: String,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiHttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_COMPLETION_API_VERSION.to_string(),
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn endpoint(&self) -> String {
        join_endpoint(
            &self.base_url,
            &format!(
                "openai/deployments/{}/chat/completions?api-version={}",
                self.deployment, self.api_version
            ),
        )
    }
}

impl CompletionTransport for AzureOpenAiHttpTransport {
    fn send<'a>(
        &'a self,
        request: &'a CompletionRequest,
        token: &'a AccessToken,
    ) -> ProviderFuture<'a, Result<HttpReply, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request);
            post_json_with_bearer(&self.client, &self.endpoint(), &api_request, token).await
        })
    }
}
