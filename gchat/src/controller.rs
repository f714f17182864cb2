//! Session-facing chat actions over the orchestrator and a transcript store.

use std::sync::Arc;

use gcommon::SessionId;

use crate::{ChatError, ConversationOrchestrator, TranscriptStore, Turn};

#[derive(Clone)]
pub struct ChatController {
    orchestrator: ConversationOrchestrator,
    store: Arc<dyn TranscriptStore>,
}

impl ChatController {
    pub fn new(orchestrator: ConversationOrchestrator, store: Arc<dyn TranscriptStore>) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    /// Blank input is ignored and yields `Ok(None)` without a service call.
    pub async fn send_message(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<Option<String>, ChatError> {
        if message.trim().is_empty() {
            tracing::debug!(
                phase = "controller",
                event = "blank_message_ignored",
                session_id = %session_id
            );
            return Ok(None);
        }

        self.store
            .append(session_id, vec![Turn::user(message)])
            .await?;

        let reply = self.orchestrator.respond(message).await;

        self.store
            .append(session_id, vec![Turn::assistant(reply.clone())])
            .await?;

        Ok(Some(reply))
    }

    pub async fn history(&self, session_id: &SessionId) -> Result<String, ChatError> {
        Ok(self.store.load(session_id).await?.render())
    }

    pub async fn clear(&self, session_id: &SessionId) -> Result<(), ChatError> {
        self.store.clear(session_id).await
    }
}
