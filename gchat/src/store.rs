//! Transcript storage contracts and a basic in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use gcommon::{BoxFuture, SessionId};

use crate::{ChatError, ChatTranscript, TranscriptLimit, Turn};

pub trait TranscriptStore: Send + Sync {
    /// Returns the session's transcript, empty when the session is unknown.
    fn load<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<ChatTranscript, ChatError>>;

    fn append<'a>(
        &'a self,
        session_id: &'a SessionId,
        turns: Vec<Turn>,
    ) -> BoxFuture<'a, Result<(), ChatError>>;

    fn clear<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<(), ChatError>>;
}

#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    sessions: Mutex<HashMap<SessionId, ChatTranscript>>,
    limit: TranscriptLimit,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: TranscriptLimit) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            limit,
        }
    }

    pub fn limit(&self) -> TranscriptLimit {
        self.limit
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    fn load<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<ChatTranscript, ChatError>> {
        Box::pin(async move {
            let sessions = self
                .sessions
                .lock()
                .map_err(|_| ChatError::store("transcript store lock poisoned"))?;

            Ok(sessions
                .get(session_id)
                .cloned()
                .unwrap_or_else(|| ChatTranscript::new(self.limit)))
        })
    }

    fn append<'a>(
        &'a self,
        session_id: &'a SessionId,
        turns: Vec<Turn>,
    ) -> BoxFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| ChatError::store("transcript store lock poisoned"))?;

            sessions
                .entry(session_id.clone())
                .or_insert_with(|| ChatTranscript::new(self.limit))
                .extend(turns);

            Ok(())
        })
    }

    fn clear<'a>(&'a self, session_id: &'a SessionId) -> BoxFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| ChatError::store("transcript store lock poisoned"))?;

            if let Some(transcript) = sessions.get_mut(session_id) {
                transcript.clear();
            }

            Ok(())
        })
    }
}
