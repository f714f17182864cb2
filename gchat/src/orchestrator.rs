//! Gate-then-generate pipeline and reply formatting.

use std::sync::Arc;

use gprovider::{CompletionClient, CompletionFailure, CompletionFailureKind};
use gsafety::{ContentGate, SafetyVerdict, UNVERIFIED_CATEGORY};

/// Composes a content gate and a completion client into one infallible call.
#[derive(Clone)]
pub struct ConversationOrchestrator {
    gate: Arc<dyn ContentGate>,
    completion: Arc<dyn CompletionClient>,
}

impl ConversationOrchestrator {
    pub fn new(gate: Arc<dyn ContentGate>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { gate, completion }
    }

    /// Returns exactly one reply string: a refusal, the assistant's text, or
    /// a rendered failure. The completion client is not called for denied input.
    pub async fn respond(&self, user_message: &str) -> String {
        let verdict = self.gate.evaluate(user_message).await;
        if !verdict.allowed {
            tracing::info!(
                phase = "orchestrator",
                event = "message_refused",
                category = verdict.category.as_deref().unwrap_or(UNVERIFIED_CATEGORY),
                severity = verdict.severity
            );
            return format_refusal(&verdict);
        }

        match self.completion.complete(user_message).await {
            Ok(reply) => {
                tracing::debug!(
                    phase = "orchestrator",
                    event = "reply_generated",
                    reply_chars = reply.chars().count()
                );
                reply
            }
            Err(failure) => {
                tracing::warn!(
                    phase = "orchestrator",
                    event = "completion_failed",
                    failure_kind = ?failure.kind
                );
                format_failure(&failure)
            }
        }
    }
}

pub fn format_refusal(verdict: &SafetyVerdict) -> String {
    let category = verdict
        .category
        .as_deref()
        .unwrap_or(UNVERIFIED_CATEGORY)
        .to_lowercase();

    format!(
        "I'm sorry, but I cannot process your request as it may contain {category} content. Please rephrase your message."
    )
}

pub fn format_failure(failure: &CompletionFailure) -> String {
    match failure.kind {
        CompletionFailureKind::Http => format!("Error: {}", failure.detail),
        CompletionFailureKind::Auth | CompletionFailureKind::Transport => {
            format!("Error communicating with AI service: {}", failure.detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_lowercases_category() {
        assert_eq!(
            format_refusal(&SafetyVerdict::deny("SelfHarm", 2)),
            "I'm sorry, but I cannot process your request as it may contain selfharm content. Please rephrase your message."
        );
    }

    #[test]
    fn refusal_without_category_says_unverified() {
        let refusal = format_refusal(&SafetyVerdict::deny_unverified());
        assert!(refusal.contains("may contain unverified content"));
        assert!(refusal.contains(&format!("may contain {UNVERIFIED_CATEGORY} content")));
    }

    #[test]
    fn failures_keep_their_two_phrasings() {
        assert_eq!(
            format_failure(&CompletionFailure::http("429 Too Many Requests - rate limited")),
            "Error: 429 Too Many Requests - rate limited"
        );
        assert_eq!(
            format_failure(&CompletionFailure::transport("timeout")),
            "Error communicating with AI service: timeout"
        );
        assert_eq!(
            format_failure(&CompletionFailure::auth("no credential")),
            "Error communicating with AI service: no credential"
        );
    }
}
