//! Shared provider error kinds and error value helpers.
//!
//! ```rust
//! use gprovider::{ProviderError, ProviderErrorKind};
//!
//! let auth = ProviderError::authentication("token request rejected");
//! assert_eq!(auth.kind, ProviderErrorKind::Authentication);
//!
//! let http = ProviderError::http(429, "429 Too Many Requests - rate limited");
//! assert_eq!(http.status, Some(429));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    Http,
    Timeout,
    Transport,
    InvalidResponse,
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    /// Non-success status from a service endpoint. `message` is user-facing as-is.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ProviderErrorKind::Http, message)
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Configuration, message)
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_builders_assign_expected_kinds() {
        assert_eq!(
            ProviderError::authentication("x").kind,
            ProviderErrorKind::Authentication
        );
        assert_eq!(
            ProviderError::transport("x").kind,
            ProviderErrorKind::Transport
        );
        assert_eq!(
            ProviderError::invalid_response("x").kind,
            ProviderErrorKind::InvalidResponse
        );
        assert_eq!(ProviderError::timeout("x").status, None);
    }

    #[test]
    fn http_errors_carry_status_and_display_kind() {
        let error = ProviderError::http(503, "503 Service Unavailable - down");
        assert_eq!(error.kind, ProviderErrorKind::Http);
        assert_eq!(error.status, Some(503));
        assert_eq!(error.to_string(), "Http: 503 Service Unavailable - down");
    }
}
