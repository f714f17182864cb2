mod client;
mod serde_api;
mod transport;
mod types;

pub use client::{AzureCompletionClient, CompletionClient};
pub use transport::{AzureOpenAiHttpTransport, CompletionTransport};
pub use types::{
    ChatMessage, ChatRole, CompletionFailure, CompletionFailureKind, CompletionRequest,
    CompletionResult, DEFAULT_COMPLETION_API_VERSION, DEFAULT_DEPLOYMENT, DEFAULT_MAX_TOKENS,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, NO_RESPONSE_SENTINEL, default_generation_options,
};
