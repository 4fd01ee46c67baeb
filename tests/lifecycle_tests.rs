//! End-to-end tests for the send lifecycle against a mock HTTP backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use samvad::chat::{
    ChatConfig, ChatSession, FALLBACK_REPLY, SendOutcome, UNREACHABLE_NOTICE,
};
use samvad::transcript::{Message, Sender};
use samvad::{BackendClient, ChatReply, ChatRequest, ClientLogger, Error, Renderer};

struct NullRenderer;

impl Renderer for NullRenderer {
    fn print_message(&mut self, _message: &Message) {}
    fn print_info(&mut self, _info: &str) {}
    fn print_error(&mut self, _error: &str) {}
}

fn session_for(endpoint: String) -> ChatSession<BackendClient> {
    let config = ChatConfig::new().with_endpoint(endpoint.clone());
    let client = BackendClient::new(Some(endpoint)).expect("endpoint should parse");
    ChatSession::new(client, config)
}

fn bodies(session: &ChatSession<BackendClient>) -> Vec<(Sender, String)> {
    session
        .transcript()
        .messages()
        .iter()
        .map(|m| (m.sender, m.body.clone()))
        .collect()
}

#[tokio::test]
async fn reply_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"text": "Hello", "lang": "en"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    let outcome = session.send("Hello", &mut NullRenderer).await.unwrap();

    assert_eq!(outcome, SendOutcome::Replied("Hi there".to_string()));
    assert_eq!(
        bodies(&session),
        vec![
            (Sender::User, "Hello".to_string()),
            (Sender::Bot, "Hi there".to_string()),
        ]
    );
    assert_eq!(session.last_bot_reply(), Some("Hi there"));
    assert!(!session.is_pending());
}

#[tokio::test]
async fn language_travels_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"text": "Namaskar", "lang": "mr"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Namaskar!"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    session.set_language("mr".parse().unwrap());
    let outcome = session.send("Namaskar", &mut NullRenderer).await.unwrap();
    assert_eq!(outcome, SendOutcome::Replied("Namaskar!".to_string()));
}

#[tokio::test]
async fn server_error_surfaces_as_a_bot_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    let outcome = session.send("Test", &mut NullRenderer).await.unwrap();

    assert_eq!(outcome, SendOutcome::ServerError(500));
    assert_eq!(
        bodies(&session),
        vec![
            (Sender::User, "Test".to_string()),
            (Sender::Bot, "Server error: 500".to_string()),
        ]
    );
    assert_eq!(session.last_bot_reply(), None);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn unreachable_backend_surfaces_as_a_bot_notice() {
    // Nothing listens on port 1, so the connection is refused outright.
    let mut session = session_for("http://127.0.0.1:1/chat".to_string());
    let outcome = session.send("X", &mut NullRenderer).await.unwrap();

    assert_eq!(outcome, SendOutcome::Unreachable);
    assert_eq!(
        bodies(&session),
        vec![
            (Sender::User, "X".to_string()),
            (Sender::Bot, UNREACHABLE_NOTICE.to_string()),
        ]
    );
    assert!(!session.is_pending());
}

#[tokio::test]
async fn malformed_reply_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    let outcome = session.send("Hello", &mut NullRenderer).await.unwrap();

    assert_eq!(outcome, SendOutcome::Replied(FALLBACK_REPLY.to_string()));
    assert_eq!(session.last_bot_reply(), Some(FALLBACK_REPLY));
}

#[tokio::test]
async fn missing_reply_field_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unrelated": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    let outcome = session.send("Hello", &mut NullRenderer).await.unwrap();
    assert_eq!(outcome, SendOutcome::Replied(FALLBACK_REPLY.to_string()));
}

#[derive(Default)]
struct CountingLogger {
    requests: AtomicUsize,
    replies: AtomicUsize,
    failures: AtomicUsize,
}

impl ClientLogger for CountingLogger {
    fn log_request(&self, _request: &ChatRequest) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    fn log_reply(&self, _reply: &ChatReply) {
        self.replies.fetch_add(1, Ordering::Relaxed);
    }

    fn log_failure(&self, _error: &Error) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

#[tokio::test]
async fn diagnostics_capture_the_underlying_cause() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/chat", server.uri());
    let logger = Arc::new(CountingLogger::default());
    let client = BackendClient::new(Some(endpoint.clone()))
        .unwrap()
        .with_logger(logger.clone());
    let mut session = ChatSession::new(client, ChatConfig::new().with_endpoint(endpoint));

    let outcome = session.send("Hello", &mut NullRenderer).await.unwrap();

    // The user sees the fallback reply; the malformed body still reaches
    // diagnostics with its underlying cause.
    assert_eq!(outcome, SendOutcome::Replied(FALLBACK_REPLY.to_string()));
    assert_eq!(logger.requests.load(Ordering::Relaxed), 1);
    assert_eq!(logger.replies.load(Ordering::Relaxed), 0);
    assert_eq!(logger.failures.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn exchanges_never_interleave() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "ack"})))
        .expect(3)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    for text in ["one", "two", "three"] {
        session.send(text, &mut NullRenderer).await.unwrap();
    }

    let transcript = bodies(&session);
    assert_eq!(transcript.len(), 6);
    for pair in transcript.chunks(2) {
        assert_eq!(pair[0].0, Sender::User);
        assert_eq!(pair[1].0, Sender::Bot);
    }
}

#[tokio::test]
async fn send_after_failure_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"text": "first", "lang": "en"})))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"text": "second", "lang": "en"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "welcome back"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(format!("{}/chat", server.uri()));
    let outcome = session.send("first", &mut NullRenderer).await.unwrap();
    assert_eq!(outcome, SendOutcome::ServerError(503));
    assert!(!session.is_pending());

    let outcome = session.send("second", &mut NullRenderer).await.unwrap();
    assert_eq!(outcome, SendOutcome::Replied("welcome back".to_string()));
}
