//! Small parsing helpers and convenience constructors.

use gsafety::FailurePolicy;

use crate::{LogFormat, SessionId};

pub fn session(id: impl Into<SessionId>) -> SessionId {
    id.into()
}

pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_failure_policy(value: &str) -> Option<FailurePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "open" | "fail-open" | "fail_open" | "failopen" => Some(FailurePolicy::FailOpen),
        "closed" | "fail-closed" | "fail_closed" | "failclosed" => Some(FailurePolicy::FailClosed),
        _ => None,
    }
}

pub fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "compact" => Some(LogFormat::Compact),
        "pretty" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use gsafety::FailurePolicy;

    use super::{parse_failure_policy, parse_flag, parse_log_format, session};
    use crate::LogFormat;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn parse_failure_policy_supports_aliases() {
        assert_eq!(parse_failure_policy("closed"), Some(FailurePolicy::FailClosed));
        assert_eq!(parse_failure_policy("Fail-Open"), Some(FailurePolicy::FailOpen));
        assert_eq!(parse_failure_policy("strict"), None);
    }

    #[test]
    fn parse_log_format_is_case_insensitive() {
        assert_eq!(parse_log_format("JSON"), Some(LogFormat::Json));
        assert_eq!(parse_log_format("pretty"), Some(LogFormat::Pretty));
        assert_eq!(parse_log_format("xml"), None);
    }

    #[test]
    fn session_helper_builds_session_id() {
        assert_eq!(session("browser-1").as_str(), "browser-1");
    }
}
