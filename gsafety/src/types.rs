//! Verdict, category, and policy types for the content gate.

pub const DEFAULT_SAFETY_API_VERSION: &str = "2023-10-01";
pub const FOUR_SEVERITY_LEVELS: &str = "FourSeverityLevels";

/// Lowest severity that denies a message ("low or above").
pub const DEFAULT_SEVERITY_THRESHOLD: u8 = 1;

/// Label for a denial that names no category.
pub const UNVERIFIED_CATEGORY: &str = "unverified";

/// One moderation category as scored by the service, in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySeverity {
    pub category: String,
    pub severity: u8,
}

impl CategorySeverity {
    pub fn new(category: impl Into<String>, severity: u8) -> Self {
        Self {
            category: category.into(),
            severity,
        }
    }
}

/// Outcome of gating one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub allowed: bool,
    pub category: Option<String>,
    pub severity: Option<u8>,
}

impl SafetyVerdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            category: None,
            severity: None,
        }
    }

    pub fn deny(category: impl Into<String>, severity: u8) -> Self {
        Self {
            allowed: false,
            category: Some(category.into()),
            severity: Some(severity),
        }
    }

    /// Denial without an attributed category, used when the gate could not run.
    pub fn deny_unverified() -> Self {
        Self {
            allowed: false,
            category: None,
            severity: None,
        }
    }

    /// Reduces categories to a verdict: the first category at or above
    /// `threshold` wins, in the order given.
    pub fn from_categories(categories: &[CategorySeverity], threshold: u8) -> Self {
        categories
            .iter()
            .find(|entry| entry.severity >= threshold)
            .map(|entry| Self::deny(entry.category.clone(), entry.severity))
            .unwrap_or_else(Self::allow)
    }
}

/// What the evaluator answers when the moderation call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    FailOpen,
    FailClosed,
}

impl FailurePolicy {
    pub fn verdict(self) -> SafetyVerdict {
        match self {
            Self::FailOpen => SafetyVerdict::allow(),
            Self::FailClosed => SafetyVerdict::deny_unverified(),
        }
    }
}
