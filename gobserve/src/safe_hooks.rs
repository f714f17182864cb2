use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use gprovider::{ProviderError, ProviderOperationHooks, ServiceId};
use gsafety::{FailurePolicy, SafetyError, SafetyHooks, SafetyVerdict};

pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_request_start(&self, service: ServiceId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_start(service, operation)
        }));
    }

    fn on_success(&self, service: ServiceId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(service, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        service: ServiceId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(service, operation, elapsed, error)
        }));
    }
}

pub struct SafeSafetyHooks<H> {
    inner: H,
}

impl<H> SafeSafetyHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SafetyHooks for SafeSafetyHooks<H>
where
    H: SafetyHooks,
{
    fn on_evaluation_start(&self, text_chars: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_evaluation_start(text_chars)
        }));
    }

    fn on_category_observed(&self, category: &str, severity: u8) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_category_observed(category, severity)
        }));
    }

    fn on_verdict(&self, verdict: &SafetyVerdict) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_verdict(verdict)));
    }

    fn on_failure_absorbed(&self, error: &SafetyError, policy: FailurePolicy) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure_absorbed(error, policy)
        }));
    }
}
