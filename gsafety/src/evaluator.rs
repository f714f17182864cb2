//! The content gate: moderation call plus first-breach reduction.

use std::sync::Arc;
use std::time::Instant;

use gcommon::BoxFuture;
use gprovider::{
    COGNITIVE_SERVICES_SCOPE, NoopOperationHooks, ProviderError, ProviderOperationHooks, ServiceId,
    TokenCredential,
};

use crate::serde_api::parse_analysis_body;
use crate::transport::ContentSafetyTransport;
use crate::types::{CategorySeverity, DEFAULT_SEVERITY_THRESHOLD};
use crate::{FailurePolicy, NoopSafetyHooks, SafetyError, SafetyHooks, SafetyVerdict};

const OPERATION: &str = "analyze_text";

/// Decides whether a user message may proceed to generation. Never fails.
pub trait ContentGate: Send + Sync {
    fn evaluate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, SafetyVerdict>;
}

#[derive(Clone)]
pub struct SafetyEvaluator {
    credential: Arc<dyn TokenCredential>,
    transport: Arc<dyn ContentSafetyTransport>,
    hooks: Arc<dyn SafetyHooks>,
    operation_hooks: Arc<dyn ProviderOperationHooks>,
    scope: String,
    threshold: u8,
    policy: FailurePolicy,
}

impl SafetyEvaluator {
    pub fn new(
        credential: Arc<dyn TokenCredential>,
        transport: Arc<dyn ContentSafetyTransport>,
    ) -> Self {
        Self {
            credential,
            transport,
            hooks: Arc::new(NoopSafetyHooks),
            operation_hooks: Arc::new(NoopOperationHooks),
            scope: COGNITIVE_SERVICES_SCOPE.to_string(),
            threshold: DEFAULT_SEVERITY_THRESHOLD,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn SafetyHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_operation_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.operation_hooks = hooks;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    async fn analyze(&self, text: &str) -> Result<Vec<CategorySeverity>, SafetyError> {
        let started = Instant::now();
        self.operation_hooks
            .on_request_start(ServiceId::ContentSafety, OPERATION);

        match self.request_analysis(text).await {
            Ok(categories) => {
                self.operation_hooks.on_success(
                    ServiceId::ContentSafety,
                    OPERATION,
                    started.elapsed(),
                );
                Ok(categories)
            }
            Err(error) => {
                self.operation_hooks.on_failure(
                    ServiceId::ContentSafety,
                    OPERATION,
                    started.elapsed(),
                    &error,
                );
                Err(SafetyError::from(error))
            }
        }
    }

    async fn request_analysis(&self, text: &str) -> Result<Vec<CategorySeverity>, ProviderError> {
        let token = self
            .credential
            .get_token(&self.scope)
            .await
            .map_err(|error| ProviderError::authentication(error.message))?;

        let reply = self.transport.analyze(text, &token).await?;
        if !reply.is_success() {
            return Err(reply.into_http_error());
        }

        parse_analysis_body(&reply.body)
            .map_err(|error| ProviderError::invalid_response(error.message))
    }

    fn judge(&self, categories: &[CategorySeverity]) -> SafetyVerdict {
        for entry in categories {
            self.hooks
                .on_category_observed(&entry.category, entry.severity);
            if entry.severity >= self.threshold {
                break;
            }
        }

        SafetyVerdict::from_categories(categories, self.threshold)
    }
}

impl ContentGate for SafetyEvaluator {
    fn evaluate<'a>(&'a self, text: &'a str) -> BoxFuture<'a, SafetyVerdict> {
        Box::pin(async move {
            self.hooks.on_evaluation_start(text.chars().count());

            let verdict = match self.analyze(text).await {
                Ok(categories) => self.judge(&categories),
                Err(error) => {
                    self.hooks.on_failure_absorbed(&error, self.policy);
                    self.policy.verdict()
                }
            };

            self.hooks.on_verdict(&verdict);
            verdict
        })
    }
}
