//! Production-friendly observability hooks for service calls and the content gate.
//!
//! ```rust
//! use gobserve::{MetricsObservabilityHooks, SafeProviderHooks, SafeSafetyHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _safety_hooks = SafeSafetyHooks::new(MetricsObservabilityHooks);
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeProviderHooks, SafeSafetyHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeProviderHooks, SafeSafetyHooks, TracingObservabilityHooks,
    };
}
