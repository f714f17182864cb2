//! Metrics-based observability hooks for service calls and gate evaluations.
//!
//! ```rust
//! use gobserve::MetricsObservabilityHooks;
//! use gprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use gprovider::{ProviderError, ProviderOperationHooks, ServiceId};
use gsafety::{FailurePolicy, SafetyError, SafetyHooks, SafetyVerdict, UNVERIFIED_CATEGORY};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

/// Matches the category named in the refusal text.
pub(crate) fn denied_category_label(verdict: &SafetyVerdict) -> String {
    verdict
        .category
        .clone()
        .unwrap_or_else(|| UNVERIFIED_CATEGORY.to_string())
}

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, service: ServiceId, operation: &str) {
        metrics::counter!(
            "chatgate_service_request_start_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, service: ServiceId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "chatgate_service_success_total",
            "service" => service.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "chatgate_service_duration_seconds",
            "service" => service.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        service: ServiceId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "chatgate_service_failure_total",
            "service" => service.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "chatgate_service_duration_seconds",
            "service" => service.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl SafetyHooks for MetricsObservabilityHooks {
    fn on_evaluation_start(&self, _text_chars: usize) {
        metrics::counter!("chatgate_safety_evaluation_total").increment(1);
    }

    fn on_verdict(&self, verdict: &SafetyVerdict) {
        if verdict.allowed {
            metrics::counter!("chatgate_safety_allowed_total").increment(1);
        } else {
            metrics::counter!(
                "chatgate_safety_denied_total",
                "category" => denied_category_label(verdict)
            )
            .increment(1);
        }
    }

    fn on_failure_absorbed(&self, error: &SafetyError, policy: FailurePolicy) {
        metrics::counter!(
            "chatgate_safety_failure_absorbed_total",
            "error_kind" => format!("{:?}", error.kind),
            "policy" => format!("{:?}", policy)
        )
        .increment(1);
    }
}
