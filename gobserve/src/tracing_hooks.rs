//! Tracing-based observability hooks for service calls and gate evaluations.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gsafety::SafetyHooks;
//!
//! fn accepts_safety_hooks(_hooks: &dyn SafetyHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_safety_hooks(&hooks);
//! ```

use std::time::Duration;

use gprovider::{ProviderError, ProviderOperationHooks, ServiceId};
use gsafety::{FailurePolicy, SafetyError, SafetyHooks, SafetyVerdict};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_request_start(&self, service: ServiceId, operation: &str) {
        tracing::info!(
            phase = "provider",
            event = "request_start",
            service = %service,
            operation
        );
    }

    fn on_success(&self, service: ServiceId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            service = %service,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        service: ServiceId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            service = %service,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status,
            error = %error
        );
    }
}

impl SafetyHooks for TracingObservabilityHooks {
    fn on_evaluation_start(&self, text_chars: usize) {
        tracing::debug!(phase = "safety", event = "evaluation_start", text_chars);
    }

    fn on_category_observed(&self, category: &str, severity: u8) {
        tracing::debug!(
            phase = "safety",
            event = "category_observed",
            category,
            severity
        );
    }

    fn on_verdict(&self, verdict: &SafetyVerdict) {
        tracing::info!(
            phase = "safety",
            event = "verdict",
            allowed = verdict.allowed,
            category = verdict.category.as_deref(),
            severity = verdict.severity
        );
    }

    fn on_failure_absorbed(&self, error: &SafetyError, policy: FailurePolicy) {
        tracing::warn!(
            phase = "safety",
            event = "failure_absorbed",
            error_kind = ?error.kind,
            policy = ?policy,
            error = %error
        );
    }
}
