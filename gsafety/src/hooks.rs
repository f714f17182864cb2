//! Diagnostic hooks for gate evaluations.

use crate::{FailurePolicy, SafetyError, SafetyVerdict};

/// Receives the evaluator's trace. Message text itself is never passed, only
/// its character count.
pub trait SafetyHooks: Send + Sync {
    fn on_evaluation_start(&self, _text_chars: usize) {}

    fn on_category_observed(&self, _category: &str, _severity: u8) {}

    fn on_verdict(&self, _verdict: &SafetyVerdict) {}

    fn on_failure_absorbed(&self, _error: &SafetyError, _policy: FailurePolicy) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSafetyHooks;

impl SafetyHooks for NoopSafetyHooks {}
