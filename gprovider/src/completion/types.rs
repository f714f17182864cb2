//! Completion request, reply, and failure types.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gcommon::GenerationOptions;

use crate::{ProviderError, ProviderErrorKind};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant for Zava Storefront.";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";
pub const DEFAULT_COMPLETION_API_VERSION: &str = "2024-02-15-preview";

/// Returned in place of a reply when the service answers without content.
pub const NO_RESPONSE_SENTINEL: &str = "No response from AI";

pub fn default_generation_options() -> GenerationOptions {
    GenerationOptions::default()
        .with_max_tokens(DEFAULT_MAX_TOKENS)
        .with_temperature(DEFAULT_TEMPERATURE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One single-turn completion call: the system instruction plus the user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(ChatRole::System, self.system_prompt.clone()),
            ChatMessage::new(ChatRole::User, self.user_message.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionFailureKind {
    /// Credential acquisition failed before any request was sent.
    Auth,
    /// The completion endpoint answered with a non-success status.
    Http,
    /// Network, serialization, or response-shape failure.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionFailure {
    pub kind: CompletionFailureKind,
    pub detail: String,
}

impl CompletionFailure {
    pub fn new(kind: CompletionFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn auth(detail: impl Into<String>) -> Self {
        Self::new(CompletionFailureKind::Auth, detail)
    }

    pub fn http(detail: impl Into<String>) -> Self {
        Self::new(CompletionFailureKind::Http, detail)
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::new(CompletionFailureKind::Transport, detail)
    }
}

impl Display for CompletionFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.detail)
    }
}

impl Error for CompletionFailure {}

impl From<ProviderError> for CompletionFailure {
    fn from(value: ProviderError) -> Self {
        let kind = match value.kind {
            ProviderErrorKind::Authentication => CompletionFailureKind::Auth,
            ProviderErrorKind::Http => CompletionFailureKind::Http,
            _ => CompletionFailureKind::Transport,
        };

        Self::new(kind, value.message)
    }
}

pub type CompletionResult = Result<String, CompletionFailure>;
