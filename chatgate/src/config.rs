//! Runtime configuration, loaded from the environment or built in code.
//!
//! ```rust
//! use chatgate::ChatGateConfig;
//!
//! let config = ChatGateConfig::new("https://zava.cognitiveservices.azure.com/").expect("valid");
//! assert_eq!(config.endpoint, "https://zava.cognitiveservices.azure.com");
//! assert_eq!(config.deployment, "gpt-4o-mini");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use gchat::TranscriptLimit;
use gprovider::{COGNITIVE_SERVICES_SCOPE, DEFAULT_COMPLETION_API_VERSION, DEFAULT_DEPLOYMENT};
use gsafety::{DEFAULT_SAFETY_API_VERSION, DEFAULT_SEVERITY_THRESHOLD, FailurePolicy};

use crate::LogFormat;
use crate::util::{parse_failure_policy, parse_flag, parse_log_format};

pub const ENV_ENDPOINT: &str = "AI_FOUNDRY_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "CHATGATE_DEPLOYMENT";
pub const ENV_TIMEOUT_SECS: &str = "CHATGATE_TIMEOUT_SECS";
pub const ENV_FAIL_CLOSED: &str = "CHATGATE_FAIL_CLOSED";
pub const ENV_FAILURE_POLICY: &str = "CHATGATE_FAILURE_POLICY";
pub const ENV_SEVERITY_THRESHOLD: &str = "CHATGATE_SEVERITY_THRESHOLD";
pub const ENV_TRANSCRIPT_MAX_TURNS: &str = "CHATGATE_TRANSCRIPT_MAX_TURNS";
pub const ENV_LOG_FORMAT: &str = "CHATGATE_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "CHATGATE_LOG_LEVEL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Highest severity on the four-level scale.
const MAX_SEVERITY: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue { key: String },
    InvalidValue { key: String, value: String },
    HttpClient { message: String },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingValue { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue { key } => write!(f, "missing required setting `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for `{key}`: `{value}`")
            }
            Self::HttpClient { message } => write!(f, "could not build http client: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatGateConfig {
    pub endpoint: String,
    pub deployment: String,
    pub completion_api_version: String,
    pub safety_api_version: String,
    pub scope: String,
    pub timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub severity_threshold: u8,
    pub transcript_limit: TranscriptLimit,
    pub log_format: LogFormat,
    pub log_level: String,
}

impl ChatGateConfig {
    /// Validates the base endpoint and strips trailing slashes.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = normalize_endpoint(&endpoint.into())?;

        Ok(Self {
            endpoint,
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            completion_api_version: DEFAULT_COMPLETION_API_VERSION.to_string(),
            safety_api_version: DEFAULT_SAFETY_API_VERSION.to_string(),
            scope: COGNITIVE_SERVICES_SCOPE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            failure_policy: FailurePolicy::default(),
            severity_threshold: DEFAULT_SEVERITY_THRESHOLD,
            transcript_limit: TranscriptLimit::default(),
            log_format: LogFormat::Compact,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(gprovider::read_env)
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let endpoint = read(ENV_ENDPOINT).ok_or_else(|| ConfigError::missing(ENV_ENDPOINT))?;
        let mut config = Self::new(endpoint)?;

        if let Some(deployment) = read(ENV_DEPLOYMENT) {
            config.deployment = deployment.trim().to_string();
        }

        if let Some(value) = read(ENV_TIMEOUT_SECS) {
            let seconds = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| ConfigError::invalid(ENV_TIMEOUT_SECS, &value))?;
            config.timeout = Duration::from_secs(seconds);
        }

        if let Some(value) = read(ENV_FAILURE_POLICY) {
            config.failure_policy = parse_failure_policy(&value)
                .ok_or_else(|| ConfigError::invalid(ENV_FAILURE_POLICY, &value))?;
        }

        if let Some(value) = read(ENV_FAIL_CLOSED) {
            let fail_closed =
                parse_flag(&value).ok_or_else(|| ConfigError::invalid(ENV_FAIL_CLOSED, &value))?;
            config.failure_policy = if fail_closed {
                FailurePolicy::FailClosed
            } else {
                FailurePolicy::FailOpen
            };
        }

        if let Some(value) = read(ENV_SEVERITY_THRESHOLD) {
            config.severity_threshold = value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|threshold| (1..=MAX_SEVERITY).contains(threshold))
                .ok_or_else(|| ConfigError::invalid(ENV_SEVERITY_THRESHOLD, &value))?;
        }

        if let Some(value) = read(ENV_TRANSCRIPT_MAX_TURNS) {
            let max_turns = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|max_turns| *max_turns > 0)
                .ok_or_else(|| ConfigError::invalid(ENV_TRANSCRIPT_MAX_TURNS, &value))?;
            config.transcript_limit = TranscriptLimit::new(max_turns);
        }

        if let Some(value) = read(ENV_LOG_FORMAT) {
            config.log_format = parse_log_format(&value)
                .ok_or_else(|| ConfigError::invalid(ENV_LOG_FORMAT, &value))?;
        }

        if let Some(value) = read(ENV_LOG_LEVEL) {
            config.log_level = value.trim().to_string();
        }

        Ok(config)
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_severity_threshold(mut self, threshold: u8) -> Self {
        self.severity_threshold = threshold;
        self
    }

    pub fn with_transcript_limit(mut self, limit: TranscriptLimit) -> Self {
        self.transcript_limit = limit;
        self
    }
}

fn normalize_endpoint(raw: &str) -> Result<String, ConfigError> {
    let endpoint = raw.trim().trim_end_matches('/');
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(ConfigError::invalid(ENV_ENDPOINT, raw));
    }

    let host = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    if host.is_empty() {
        return Err(ConfigError::invalid(ENV_ENDPOINT, raw));
    }

    Ok(endpoint.to_string())
}
