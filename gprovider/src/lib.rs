//! Credential sources and the Azure OpenAI completion client.
//!
//! Every outbound call authenticates with a bearer token obtained from a
//! [`TokenCredential`] for the Cognitive Services scope. Transports return the
//! raw [`HttpReply`] so status interpretation stays in one place.
//!
//! ```rust
//! use gprovider::{CompletionFailure, CompletionFailureKind, ProviderError};
//!
//! let failure = CompletionFailure::from(ProviderError::http(429, "429 Too Many Requests - slow down"));
//! assert_eq!(failure.kind, CompletionFailureKind::Http);
//! ```

pub mod completion;
pub mod credentials;
pub mod error;
pub mod hooks;
pub mod http;
pub mod identity;
pub mod prelude;

pub type ProviderFuture<'a, T> = gcommon::BoxFuture<'a, T>;

pub use completion::{
    AzureCompletionClient, AzureOpenAiHttpTransport, ChatMessage, ChatRole, CompletionClient,
    CompletionFailure, CompletionFailureKind, CompletionRequest, CompletionResult,
    CompletionTransport, DEFAULT_COMPLETION_API_VERSION, DEFAULT_DEPLOYMENT, DEFAULT_MAX_TOKENS,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE, NO_RESPONSE_SENTINEL, default_generation_options,
};
pub use credentials::{
    AccessToken, COGNITIVE_SERVICES_SCOPE, ChainedTokenCredential, SecretString,
    StaticTokenCredential, TokenCredential,
};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, ServiceId};
pub use http::{HttpReply, join_endpoint, post_json_with_bearer, status_line};
pub use identity::{
    ClientSecretCredential, ManagedIdentityCredential, ManagedIdentityEndpoint,
    default_credential_chain, read_env,
};
