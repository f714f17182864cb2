//! Content-gated chat assistant for the Zava storefront.
//!
//! This crate is the single dependency for applications. It re-exports the
//! workspace crates and wires them from a [`ChatGateConfig`].
//!
//! ```rust,no_run
//! use chatgate::prelude::*;
//!
//! # async fn run() -> Result<(), ConfigError> {
//! let config = ChatGateConfig::from_env()?;
//! init_tracing(config.log_format, &config.log_level);
//! let runtime = build_runtime_from_env(&config)?;
//!
//! let reply = runtime.orchestrator.respond("Do you ship to Canada?").await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod prelude;
pub mod runtime;
pub mod telemetry;
pub mod util;

pub use gchat;
pub use gcommon;
pub use gobserve;
pub use gprovider;
pub use gsafety;

pub use config::{ChatGateConfig, ConfigError};
pub use gchat::{
    ChatController, ChatError, ChatErrorKind, ChatTranscript, ConversationOrchestrator,
    InMemoryTranscriptStore, Speaker, TranscriptLimit, TranscriptStore, Turn,
};
pub use gcommon::{BoxFuture, GenerationOptions, SessionId};
pub use gobserve::{
    MetricsObservabilityHooks, SafeProviderHooks, SafeSafetyHooks, TracingObservabilityHooks,
};
pub use gprovider::{
    AccessToken, AzureCompletionClient, ChainedTokenCredential, ClientSecretCredential,
    CompletionClient, CompletionFailure, CompletionFailureKind, ManagedIdentityCredential,
    ProviderError, ProviderErrorKind, StaticTokenCredential, TokenCredential,
};
pub use gsafety::{ContentGate, FailurePolicy, SafetyEvaluator, SafetyVerdict};
pub use runtime::{
    ChatRuntime, RuntimeHooks, build_runtime, build_runtime_from_env, build_runtime_with,
    default_credential, http_client,
};
pub use telemetry::{LogFormat, init_tracing};
pub use util::{parse_failure_policy, parse_flag, parse_log_format, session};
