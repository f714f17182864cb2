//! Common `gprovider` imports for downstream crates.

pub use crate::{
    AccessToken, AzureCompletionClient, CompletionClient, CompletionFailure,
    CompletionFailureKind, CompletionResult, HttpReply, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderOperationHooks, ServiceId, TokenCredential,
};
pub use gcommon::{BoxFuture, GenerationOptions};
