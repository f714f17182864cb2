//! Operational hook contracts for outbound service calls.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Completion,
    ContentSafety,
}

impl Display for ServiceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Completion => "completion",
            Self::ContentSafety => "content-safety",
        };

        f.write_str(id)
    }
}

pub trait ProviderOperationHooks: Send + Sync {
    fn on_request_start(&self, _service: ServiceId, _operation: &str) {}

    fn on_success(&self, _service: ServiceId, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _service: ServiceId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}
