//! reqwest implementation of [`ChatBackend`].

use std::time::Duration;

use async_trait::async_trait;
use cozy_protocol::{
    ChatMessage, HISTORY_PATH, HistoryResponse, MESSAGE_PATH, SendMessageRequest,
    SendMessageResponse,
};
use reqwest::Url;
use tracing::debug;

use crate::backend::{ChatBackend, SendReply};
use crate::http_client::{create_client_with_timeout, create_default_client};
use crate::{ClientError, Result};

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpChatBackend {
    /// Create a backend client for `base_url` with the default timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let client = create_default_client().map_err(ClientError::Setup)?;
        Self::with_client(client, base_url)
    }

    /// Create a backend client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let client = create_client_with_timeout(timeout).map_err(ClientError::Setup)?;
        Self::with_client(client, base_url)
    }

    /// Create a backend client reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref();
        let base_url =
            Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(raw.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Join an endpoint path (and an optional trailing segment) onto the base
    /// URL. The trailing segment is percent-encoded.
    fn endpoint(&self, path: &str, tail: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let url = self.endpoint(HISTORY_PATH, Some(session_id))?;
        debug!(%url, "Fetching conversation history");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::SessionNotFound(session_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let history: HistoryResponse = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("history: {e}")))?;

        debug!(count = history.messages.len(), "History received");
        Ok(history.messages)
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<SendReply> {
        let url = self.endpoint(MESSAGE_PATH, None)?;
        debug!(
            %url,
            chars = request.message.chars().count(),
            has_session = request.session_id.is_some(),
            "Sending chat message"
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Failure statuses still carry a JSON body with an `error` field
        let body: SendMessageResponse = serde_json::from_str(&text).map_err(|e| {
            ClientError::InvalidResponse(format!("message (status {status}): {e}"))
        })?;

        debug!(status = status.as_u16(), "Chat message response received");
        Ok(SendReply {
            success: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cozy_protocol::Sender;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn json_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
    }

    #[tokio::test]
    async fn test_fetch_history_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/s-1"))
            .respond_with(json_response(
                200,
                json!({
                    "sessionId": "s-1",
                    "messages": [
                        {"id": "m1", "sender": "user", "content": "Hi", "timestamp": "2024-05-01T10:00:00Z"},
                        {"id": "m2", "sender": "ai", "content": "Hello!", "timestamp": "2024-05-01T10:00:01Z"}
                    ]
                }),
            ))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let messages = backend.fetch_history("s-1").await.expect("history");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, "m1");
        assert_eq!(messages[1].sender, Sender::Agent);
        assert_eq!(
            messages[1].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fetch_history_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/gone"))
            .respond_with(json_response(404, json!({"error": "Session not found"})))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let err = backend.fetch_history("gone").await.unwrap_err();
        assert!(err.is_session_not_found());
    }

    #[tokio::test]
    async fn test_fetch_history_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/s-1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let err = backend.fetch_history("s-1").await.unwrap_err();
        assert!(matches!(err, ClientError::ServerError { status: 500, .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_fetch_history_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/s-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let err = backend.fetch_history("s-1").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_history_escapes_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat/history/a%2Fb"))
            .respond_with(json_response(200, json!({"messages": []})))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let messages = backend.fetch_history("a/b").await.expect("history");
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"message": "Where is my order #4521?"})))
            .respond_with(json_response(
                200,
                json!({"reply": "Let me check that for you.", "sessionId": "s-1"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let reply = backend
            .send_message(&SendMessageRequest::new("Where is my order #4521?", None))
            .await
            .expect("send");

        assert!(reply.success);
        assert_eq!(reply.body.reply(), Some("Let me check that for you."));
        assert_eq!(reply.body.session_id(), Some("s-1"));
    }

    #[tokio::test]
    async fn test_send_message_carries_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .and(body_json(json!({"message": "Thanks", "sessionId": "s-1"})))
            .respond_with(json_response(200, json!({"reply": "You're welcome!"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let reply = backend
            .send_message(&SendMessageRequest::new("Thanks", Some("s-1".to_string())))
            .await
            .expect("send");
        assert!(reply.success);
        assert_eq!(reply.body.session_id(), None);
    }

    #[tokio::test]
    async fn test_send_message_failure_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .respond_with(json_response(
                503,
                json!({"error": "Our agents are busy", "sessionId": "s-9"}),
            ))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let reply = backend
            .send_message(&SendMessageRequest::new("Hello", None))
            .await
            .expect("a body was returned");

        assert!(!reply.success);
        assert_eq!(reply.status, 503);
        assert_eq!(reply.body.error(), Some("Our agents are busy"));
        assert_eq!(reply.body.session_id(), Some("s-9"));
    }

    #[tokio::test]
    async fn test_send_message_non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/message"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(server.uri()).unwrap();
        let err = backend
            .send_message(&SendMessageRequest::new("Hello", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_send_message_unreachable_server() {
        // Nothing listens on the discard port
        let backend =
            HttpChatBackend::with_timeout("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = backend
            .send_message(&SendMessageRequest::new("Hello", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::RequestError(_)));
    }

    #[tokio::test]
    async fn test_base_url_with_prefix_and_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/message"))
            .respond_with(json_response(200, json!({"reply": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let backend = HttpChatBackend::new(format!("{}/api/", server.uri())).unwrap();
        let reply = backend
            .send_message(&SendMessageRequest::new("Hello", None))
            .await
            .expect("send");
        assert_eq!(reply.body.reply(), Some("ok"));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            HttpChatBackend::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpChatBackend::new("mailto:support@example.com"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_base_url_accessor() {
        let backend = HttpChatBackend::new("http://localhost:3001").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:3001/");
    }
}
