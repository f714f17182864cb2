use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gprovider::{
    AccessToken, AzureCompletionClient, CompletionClient, CompletionFailureKind,
    CompletionRequest, CompletionTransport, DEFAULT_SYSTEM_PROMPT, HttpReply,
    NO_RESPONSE_SENTINEL, ProviderError, ProviderFuture, ProviderOperationHooks, ServiceId,
    StaticTokenCredential, TokenCredential,
};

#[derive(Debug)]
struct FakeTransport {
    reply: Result<HttpReply, ProviderError>,
    captured_request: Mutex<Option<CompletionRequest>>,
    captured_token: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl FakeTransport {
    fn replying(reply: Result<HttpReply, ProviderError>) -> Self {
        Self {
            reply,
            captured_request: Mutex::new(None),
            captured_token: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

impl CompletionTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: &'a CompletionRequest,
        token: &'a AccessToken,
    ) -> ProviderFuture<'a, Result<HttpReply, ProviderError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.captured_request.lock().expect("request lock") = Some(request.clone());
            *self.captured_token.lock().expect("token lock") = Some(token.secret().to_string());
            self.reply.clone()
        })
    }
}

struct RejectingCredential;

impl TokenCredential for RejectingCredential {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn get_token<'a>(
        &'a self,
        _scope: &'a str,
    ) -> ProviderFuture<'a, Result<AccessToken, ProviderError>> {
        Box::pin(async move { Err(ProviderError::configuration("no identity configured")) })
    }
}

#[derive(Default)]
struct RecordingHooks {
    events: Mutex<Vec<String>>,
}

impl ProviderOperationHooks for RecordingHooks {
    fn on_request_start(&self, service: ServiceId, operation: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{service}:{operation}"));
    }

    fn on_success(&self, service: ServiceId, operation: &str, _elapsed: Duration) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{service}:{operation}"));
    }

    fn on_failure(
        &self,
        service: ServiceId,
        operation: &str,
        _elapsed: Duration,
        error: &ProviderError,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("failure:{service}:{operation}:{:?}", error.kind));
    }
}

fn static_credential() -> Arc<dyn TokenCredential> {
    Arc::new(StaticTokenCredential::new("entra-token").expect("token should build"))
}

#[tokio::test]
async fn successful_reply_returns_first_choice_content() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok(
        r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#,
    ))));
    let client = AzureCompletionClient::new(static_credential(), transport.clone());

    let reply = client.complete("hi").await.expect("completion should succeed");

    assert_eq!(reply, "Hello");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);

    let request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(request.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert_eq!(request.user_message, "hi");
    assert_eq!(request.max_tokens, 800);
    assert_eq!(request.temperature, 0.7);

    let token = transport
        .captured_token
        .lock()
        .expect("token lock")
        .clone();
    assert_eq!(token.as_deref(), Some("entra-token"));
}

#[tokio::test]
async fn null_content_returns_no_response_sentinel() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok(
        r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
    ))));
    let client = AzureCompletionClient::new(static_credential(), transport);

    let reply = client.complete("hi").await.expect("completion should succeed");
    assert_eq!(reply, NO_RESPONSE_SENTINEL);
}

#[tokio::test]
async fn non_success_status_becomes_http_failure_with_status_and_body() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::new(
        429,
        "rate limited",
    ))));
    let client = AzureCompletionClient::new(static_credential(), transport);

    let failure = client.complete("hi").await.expect_err("429 should fail");
    assert_eq!(failure.kind, CompletionFailureKind::Http);
    assert!(failure.detail.contains("429"));
    assert!(failure.detail.contains("rate limited"));
}

#[tokio::test]
async fn transport_error_becomes_transport_failure() {
    let transport = Arc::new(FakeTransport::replying(Err(ProviderError::timeout(
        "operation timed out",
    ))));
    let client = AzureCompletionClient::new(static_credential(), transport);

    let failure = client.complete("hi").await.expect_err("timeout should fail");
    assert_eq!(failure.kind, CompletionFailureKind::Transport);
    assert!(failure.detail.contains("timed out"));
}

#[tokio::test]
async fn malformed_body_becomes_transport_failure() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok("<html>"))));
    let client = AzureCompletionClient::new(static_credential(), transport);

    let failure = client.complete("hi").await.expect_err("bad body should fail");
    assert_eq!(failure.kind, CompletionFailureKind::Transport);
}

#[tokio::test]
async fn credential_failure_short_circuits_before_transport() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok("{}"))));
    let client = AzureCompletionClient::new(Arc::new(RejectingCredential), transport.clone());

    let failure = client.complete("hi").await.expect_err("auth should fail");
    assert_eq!(failure.kind, CompletionFailureKind::Auth);
    assert!(failure.detail.contains("no identity configured"));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hooks_observe_start_and_outcome() {
    let hooks = Arc::new(RecordingHooks::default());
    let ok_transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok(
        r#"{"choices":[{"message":{"content":"ok"}}]}"#,
    ))));
    let failing_transport = Arc::new(FakeTransport::replying(Ok(HttpReply::new(500, "boom"))));

    AzureCompletionClient::new(static_credential(), ok_transport)
        .with_hooks(hooks.clone())
        .complete("a")
        .await
        .expect("first call should succeed");
    AzureCompletionClient::new(static_credential(), failing_transport)
        .with_hooks(hooks.clone())
        .complete("b")
        .await
        .expect_err("second call should fail");

    let events = hooks.events.lock().expect("events lock").clone();
    assert_eq!(
        events,
        vec![
            "start:completion:complete".to_string(),
            "success:completion:complete".to_string(),
            "start:completion:complete".to_string(),
            "failure:completion:complete:Http".to_string(),
        ]
    );
}

#[tokio::test]
async fn custom_system_prompt_and_options_flow_into_request() {
    let transport = Arc::new(FakeTransport::replying(Ok(HttpReply::ok(
        r#"{"choices":[{"message":{"content":"ok"}}]}"#,
    ))));
    let client = AzureCompletionClient::new(static_credential(), transport.clone())
        .with_system_prompt("be terse")
        .with_options(gcommon::GenerationOptions::default().with_max_tokens(64));

    client.complete("hi").await.expect("completion should succeed");

    let request = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(request.system_prompt, "be terse");
    assert_eq!(request.max_tokens, 64);
    assert_eq!(request.temperature, 0.7);
}
