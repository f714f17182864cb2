//! Runtime wiring: one shared HTTP client, both service clients, the
//! orchestrator, and a controller over an in-memory transcript store.

use std::sync::Arc;

use gchat::{ChatController, ConversationOrchestrator, InMemoryTranscriptStore, TranscriptStore};
use gobserve::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeSafetyHooks, TracingObservabilityHooks,
};
use gprovider::{
    AzureCompletionClient, AzureOpenAiHttpTransport, CompletionTransport, NoopOperationHooks,
    ProviderOperationHooks, TokenCredential, default_credential_chain, read_env,
};
use gsafety::{
    AzureContentSafetyHttpTransport, ContentSafetyTransport, NoopSafetyHooks, SafetyEvaluator,
    SafetyHooks,
};
use reqwest::Client;

use crate::{ChatGateConfig, ConfigError};

/// Hook implementations handed to the service clients and the evaluator.
#[derive(Clone)]
pub struct RuntimeHooks {
    pub provider: Arc<dyn ProviderOperationHooks>,
    pub safety: Arc<dyn SafetyHooks>,
}

impl RuntimeHooks {
    pub fn tracing() -> Self {
        Self {
            provider: Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)),
            safety: Arc::new(SafeSafetyHooks::new(TracingObservabilityHooks)),
        }
    }

    pub fn metrics() -> Self {
        Self {
            provider: Arc::new(SafeProviderHooks::new(MetricsObservabilityHooks)),
            safety: Arc::new(SafeSafetyHooks::new(MetricsObservabilityHooks)),
        }
    }

    pub fn noop() -> Self {
        Self {
            provider: Arc::new(NoopOperationHooks),
            safety: Arc::new(NoopSafetyHooks),
        }
    }
}

impl Default for RuntimeHooks {
    fn default() -> Self {
        Self::tracing()
    }
}

#[derive(Clone)]
pub struct ChatRuntime {
    pub orchestrator: ConversationOrchestrator,
    pub controller: ChatController,
}

pub fn http_client(config: &ChatGateConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ConfigError::HttpClient {
            message: err.to_string(),
        })
}

/// Environment client secret when configured, then managed identity.
pub fn default_credential(http: Client) -> Arc<dyn TokenCredential> {
    Arc::new(default_credential_chain(http, read_env))
}

pub fn build_runtime(
    config: &ChatGateConfig,
    credential: Arc<dyn TokenCredential>,
) -> Result<ChatRuntime, ConfigError> {
    let http = http_client(config)?;
    let completion = Arc::new(
        AzureOpenAiHttpTransport::new(http.clone(), config.endpoint.clone())
            .with_deployment(config.deployment.clone())
            .with_api_version(config.completion_api_version.clone()),
    );
    let safety = Arc::new(
        AzureContentSafetyHttpTransport::new(http, config.endpoint.clone())
            .with_api_version(config.safety_api_version.clone()),
    );

    Ok(build_runtime_with(
        config,
        credential,
        completion,
        safety,
        RuntimeHooks::default(),
    ))
}

/// Builds the runtime with the credential chain discovered from the environment.
pub fn build_runtime_from_env(config: &ChatGateConfig) -> Result<ChatRuntime, ConfigError> {
    let credential = default_credential(http_client(config)?);
    build_runtime(config, credential)
}

pub fn build_runtime_with(
    config: &ChatGateConfig,
    credential: Arc<dyn TokenCredential>,
    completion_transport: Arc<dyn CompletionTransport>,
    safety_transport: Arc<dyn ContentSafetyTransport>,
    hooks: RuntimeHooks,
) -> ChatRuntime {
    let evaluator = SafetyEvaluator::new(Arc::clone(&credential), safety_transport)
        .with_scope(config.scope.clone())
        .with_threshold(config.severity_threshold)
        .with_failure_policy(config.failure_policy)
        .with_hooks(hooks.safety)
        .with_operation_hooks(Arc::clone(&hooks.provider));

    let completion = AzureCompletionClient::new(credential, completion_transport)
        .with_scope(config.scope.clone())
        .with_hooks(hooks.provider);

    let orchestrator = ConversationOrchestrator::new(Arc::new(evaluator), Arc::new(completion));
    let store: Arc<dyn TranscriptStore> =
        Arc::new(InMemoryTranscriptStore::with_limit(config.transcript_limit));
    let controller = ChatController::new(orchestrator.clone(), store);

    ChatRuntime {
        orchestrator,
        controller,
    }
}

#[cfg(test)]
mod tests {
    use gprovider::StaticTokenCredential;

    use super::*;

    #[test]
    fn build_runtime_wires_real_transports() {
        let config = ChatGateConfig::new("https://zava.cognitiveservices.azure.com")
            .expect("config should build");
        let credential = Arc::new(StaticTokenCredential::new("token").expect("token"));

        assert!(build_runtime(&config, credential).is_ok());
    }

    #[test]
    fn runtime_hooks_variants_construct() {
        let _ = RuntimeHooks::tracing();
        let _ = RuntimeHooks::metrics();
        let _ = RuntimeHooks::noop();
        let _ = RuntimeHooks::default();
    }
}
