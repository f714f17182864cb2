//! Common `gsafety` imports for downstream crates.

pub use crate::{
    ContentGate, FailurePolicy, NoopSafetyHooks, SafetyError, SafetyErrorKind, SafetyEvaluator,
    SafetyHooks, SafetyVerdict,
};
