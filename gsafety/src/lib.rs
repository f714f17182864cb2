//! Content-safety gate placed in front of every completion call.
//!
//! [`SafetyEvaluator`] submits user text to the moderation endpoint, reduces
//! the per-category severities to a [`SafetyVerdict`], and absorbs every
//! failure through its [`FailurePolicy`].
//!
//! ```rust
//! use gsafety::{CategorySeverity, FailurePolicy, SafetyVerdict};
//!
//! let categories = [CategorySeverity::new("Hate", 0), CategorySeverity::new("Violence", 2)];
//! let verdict = SafetyVerdict::from_categories(&categories, 1);
//! assert_eq!(verdict.category.as_deref(), Some("Violence"));
//!
//! assert!(FailurePolicy::default().verdict().allowed);
//! ```

mod error;
mod evaluator;
mod hooks;
mod serde_api;
mod transport;
mod types;

pub mod prelude;

pub use error::{SafetyError, SafetyErrorKind};
pub use evaluator::{ContentGate, SafetyEvaluator};
pub use hooks::{NoopSafetyHooks, SafetyHooks};
pub use transport::{AzureContentSafetyHttpTransport, ContentSafetyTransport};
pub use types::{
    CategorySeverity, DEFAULT_SAFETY_API_VERSION, DEFAULT_SEVERITY_THRESHOLD,
    FOUR_SEVERITY_LEVELS, FailurePolicy, SafetyVerdict, UNVERIFIED_CATEGORY,
};
