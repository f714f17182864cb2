//! Common imports for most chatgate applications.

pub use crate::{
    ChatController, ChatError, ChatGateConfig, ChatRuntime, ConfigError, ContentGate,
    ConversationOrchestrator, FailurePolicy, LogFormat, RuntimeHooks, SafetyVerdict, SessionId,
    TokenCredential, build_runtime, build_runtime_from_env, build_runtime_with, init_tracing,
    session,
};
