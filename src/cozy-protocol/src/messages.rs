//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Sender;

/// A message as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    /// RFC 3339 on the wire.
    pub timestamp: DateTime<Utc>,
}

/// Body of a successful history lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Messages in server order. A missing field reads as empty.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /chat/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    /// Omitted until the backend has assigned a session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SendMessageRequest {
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: message.into(),
            session_id,
        }
    }
}

/// Body returned by `POST /chat/message`, for both success and failure statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Human-readable failure cause, present on some failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendMessageResponse {
    /// Session id carried by the response, ignoring empty strings.
    pub fn session_id(&self) -> Option<&str> {
        non_empty(self.session_id.as_deref())
    }

    /// Reply text, ignoring empty strings.
    pub fn reply(&self) -> Option<&str> {
        non_empty(self.reply.as_deref())
    }

    /// Error text, ignoring empty strings.
    pub fn error(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
