//! Content-safety error kinds.
//!
//! These never leave the evaluator: every `SafetyError` is absorbed by the
//! configured [`crate::FailurePolicy`] and reported through hooks only.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyErrorKind {
    Credential,
    Http,
    Transport,
    InvalidResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyError {
    pub kind: SafetyErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl SafetyError {
    pub fn new(kind: SafetyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::new(SafetyErrorKind::Credential, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SafetyErrorKind::Transport, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(SafetyErrorKind::InvalidResponse, message)
    }
}

impl Display for SafetyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SafetyError {}

impl From<ProviderError> for SafetyError {
    fn from(value: ProviderError) -> Self {
        match value.kind {
            ProviderErrorKind::Authentication | ProviderErrorKind::Configuration => {
                Self::credential(value.message)
            }
            ProviderErrorKind::Http => Self {
                status: value.status,
                ..Self::new(SafetyErrorKind::Http, value.message)
            },
            ProviderErrorKind::InvalidResponse => Self::invalid_response(value.message),
            _ => Self::transport(value.message),
        }
    }
}
