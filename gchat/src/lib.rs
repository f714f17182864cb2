//! Conversation orchestration: the content gate in front of every completion.
//!
//! [`ConversationOrchestrator::respond`] is the core operation and never
//! fails. [`ChatController`] layers a per-session transcript on top of it.

mod controller;
mod error;
mod orchestrator;
mod store;
mod transcript;

pub mod prelude {
    pub use crate::{
        ChatController, ChatError, ChatErrorKind, ChatTranscript, ConversationOrchestrator,
        InMemoryTranscriptStore, Speaker, TranscriptLimit, TranscriptStore, Turn,
    };
    pub use gcommon::SessionId;
}

pub use controller::ChatController;
pub use error::{ChatError, ChatErrorKind};
pub use gsafety::UNVERIFIED_CATEGORY;
pub use orchestrator::{ConversationOrchestrator, format_failure, format_refusal};
pub use store::{InMemoryTranscriptStore, TranscriptStore};
pub use transcript::{ChatTranscript, DEFAULT_MAX_TURNS, Speaker, TranscriptLimit, Turn};
pub use gcommon::SessionId;
