//! Completion client over a credential source and a transport.

use std::sync::Arc;
use std::time::Instant;

use gcommon::GenerationOptions;

use crate::{
    COGNITIVE_SERVICES_SCOPE, NoopOperationHooks, ProviderError, ProviderFuture,
    ProviderOperationHooks, ServiceId, TokenCredential,
};

use super::serde_api::parse_completion_body;
use super::transport::CompletionTransport;
use super::types::{
    CompletionFailure, CompletionRequest, CompletionResult, DEFAULT_SYSTEM_PROMPT,
    NO_RESPONSE_SENTINEL, default_generation_options,
};

const OPERATION: &str = "complete";

/// Produces the assistant reply for one user message.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(&'a self, user_message: &'a str) -> ProviderFuture<'a, CompletionResult>;
}

#[derive(Clone)]
pub struct AzureCompletionClient {
    credential: Arc<dyn TokenCredential>,
    transport: Arc<dyn CompletionTransport>,
    hooks: Arc<dyn ProviderOperationHooks>,
    scope: String,
    system_prompt: String,
    options: GenerationOptions,
}

impl AzureCompletionClient {
    pub fn new(
        credential: Arc<dyn TokenCredential>,
        transport: Arc<dyn CompletionTransport>,
    ) -> Self {
        Self {
            credential,
            transport,
            hooks: Arc::new(NoopOperationHooks),
            scope: COGNITIVE_SERVICES_SCOPE.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            options: default_generation_options(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build_request(&self, user_message: &str) -> CompletionRequest {
        CompletionRequest::new(self.system_prompt.clone(), user_message, self.options)
    }

    async fn try_complete(&self, user_message: &str) -> Result<String, ProviderError> {
        let token = self
            .credential
            .get_token(&self.scope)
            .await
            .map_err(|error| ProviderError::authentication(error.message))?;

        let request = self.build_request(user_message);
        let reply = self.transport.send(&request, &token).await?;
        if !reply.is_success() {
            return Err(reply.into_http_error());
        }

        let content = parse_completion_body(&reply.body)?;
        Ok(content.unwrap_or_else(|| NO_RESPONSE_SENTINEL.to_string()))
    }
}

impl CompletionClient for AzureCompletionClient {
    fn complete<'a>(&'a self, user_message: &'a str) -> ProviderFuture<'a, CompletionResult> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_request_start(ServiceId::Completion, OPERATION);

            match self.try_complete(user_message).await {
                Ok(reply) => {
                    self.hooks
                        .on_success(ServiceId::Completion, OPERATION, started.elapsed());
                    Ok(reply)
                }
                Err(error) => {
                    self.hooks.on_failure(
                        ServiceId::Completion,
                        OPERATION,
                        started.elapsed(),
                        &error,
                    );
                    Err(CompletionFailure::from(error))
                }
            }
        })
    }
}
