//! The chat loop against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use cozy_cli::repl::{TYPING_INDICATOR, run_chat};
use cozy_client::HttpChatBackend;
use cozy_core::ConversationManager;
use cozy_storage::MemoryStore;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn chat(server: &MockServer, input: &str) -> (ConversationManager, String) {
    let backend = HttpChatBackend::new(server.uri()).unwrap();
    let manager = ConversationManager::new(Arc::new(backend), Arc::new(MemoryStore::new()));
    let mut out = Vec::new();
    run_chat(&manager, input.as_bytes(), &mut out).await.unwrap();
    (manager, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_conversation_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Let me check that for you.",
            "sessionId": "s-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (manager, out) = chat(&server, "Where is my order #4521?\n/quit\n").await;

    assert!(out.contains(TYPING_INDICATOR));
    assert!(out.contains("You: Where is my order #4521?"));
    assert!(out.contains("Cozy: Let me check that for you."));
    assert_eq!(manager.session_id().await.as_deref(), Some("s-1"));
}

#[tokio::test]
async fn test_user_message_is_printed_before_typing_indicator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/message"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"reply": "Happy to help!"}))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let (_, out) = chat(&server, "hello there\n/quit\n").await;

    let user = out.find("You: hello there").unwrap();
    let typing = out.find(TYPING_INDICATOR).unwrap();
    let reply = out.find("Cozy: Happy to help!").unwrap();
    assert!(user < typing, "typing indicator printed before the user message:\n{out}");
    assert!(typing < reply);
    assert_eq!(out.matches("You: hello there").count(), 1);
}

#[tokio::test]
async fn test_empty_line_shows_notice_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let (manager, out) = chat(&server, "   \n").await;

    assert!(out.contains("[x] Please enter a message"));
    assert!(!out.contains(TYPING_INDICATOR));
    assert_eq!(manager.messages().len(), 1);
}

#[tokio::test]
async fn test_new_command_starts_over() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Hello!",
            "sessionId": "s-1"
        })))
        .mount(&server)
        .await;

    let (manager, out) = chat(&server, "hi\n/new\n").await;

    assert!(out.contains("[+] Started a new conversation"));
    assert_eq!(manager.messages().len(), 1);
    assert_eq!(manager.session_id().await, None);
    // Welcome is printed again after the reset.
    assert_eq!(out.matches("Welcome to Cozy Cart support").count(), 2);
}
