use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gchat::{
    ChatController, ConversationOrchestrator, InMemoryTranscriptStore, SessionId,
    TranscriptLimit,
};
use gcommon::BoxFuture;
use gprovider::{CompletionClient, CompletionResult, ProviderFuture};
use gsafety::{ContentGate, SafetyVerdict};

struct AllowAll;

impl ContentGate for AllowAll {
    fn evaluate<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, SafetyVerdict> {
        Box::pin(async move { SafetyVerdict::allow() })
    }
}

#[derive(Default)]
struct EchoCompletion {
    calls: AtomicUsize,
}

impl CompletionClient for EchoCompletion {
    fn complete<'a>(&'a self, user_message: &'a str) -> ProviderFuture<'a, CompletionResult> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("echo: {user_message}"))
        })
    }
}

fn controller(completion: Arc<EchoCompletion>, limit: TranscriptLimit) -> ChatController {
    let orchestrator = ConversationOrchestrator::new(Arc::new(AllowAll), completion);
    ChatController::new(
        orchestrator,
        Arc::new(InMemoryTranscriptStore::with_limit(limit)),
    )
}

#[tokio::test]
async fn send_message_appends_user_and_assistant_turns() {
    let completion = Arc::new(EchoCompletion::default());
    let controller = controller(completion.clone(), TranscriptLimit::default());
    let session = SessionId::from("browser-1");

    let reply = controller
        .send_message(&session, "hi")
        .await
        .expect("send should succeed");

    assert_eq!(reply.as_deref(), Some("echo: hi"));
    assert_eq!(
        controller.history(&session).await.expect("history"),
        "You: hi\n\nAI: echo: hi\n\n"
    );
    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_message_is_ignored_without_service_call() {
    let completion = Arc::new(EchoCompletion::default());
    let controller = controller(completion.clone(), TranscriptLimit::default());
    let session = SessionId::from("browser-1");

    for blank in ["", "   ", "\n\t"] {
        let reply = controller
            .send_message(&session, blank)
            .await
            .expect("blank input is not an error");
        assert_eq!(reply, None);
    }

    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    assert_eq!(controller.history(&session).await.expect("history"), "");
}

#[tokio::test]
async fn clear_resets_history_for_session() {
    let controller = controller(Arc::new(EchoCompletion::default()), TranscriptLimit::default());
    let session = SessionId::from("browser-1");
    let other = SessionId::from("browser-2");

    controller
        .send_message(&session, "one")
        .await
        .expect("send should succeed");
    controller
        .send_message(&other, "two")
        .await
        .expect("send should succeed");
    controller.clear(&session).await.expect("clear should succeed");

    assert_eq!(controller.history(&session).await.expect("history"), "");
    assert_eq!(
        controller.history(&other).await.expect("history"),
        "You: two\n\nAI: echo: two\n\n"
    );
}

#[tokio::test]
async fn history_keeps_only_most_recent_turns() {
    let controller = controller(Arc::new(EchoCompletion::default()), TranscriptLimit::new(2));
    let session = SessionId::from("browser-1");

    controller
        .send_message(&session, "first")
        .await
        .expect("send should succeed");
    controller
        .send_message(&session, "second")
        .await
        .expect("send should succeed");

    assert_eq!(
        controller.history(&session).await.expect("history"),
        "You: second\n\nAI: echo: second\n\n"
    );
}
