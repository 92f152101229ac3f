//! The remote service capability.

use async_trait::async_trait;
use cozy_protocol::{ChatMessage, SendMessageRequest, SendMessageResponse};

use crate::Result;

/// Outcome of `POST /chat/message` when a response body was received.
///
/// Both success and failure statuses carry a body; `success` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReply {
    pub success: bool,
    pub status: u16,
    pub body: SendMessageResponse,
}

impl SendReply {
    pub fn ok(body: SendMessageResponse) -> Self {
        Self {
            success: true,
            status: 200,
            body,
        }
    }

    pub fn failed(status: u16, body: SendMessageResponse) -> Self {
        Self {
            success: false,
            status,
            body,
        }
    }
}

/// Remote support chat service.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetch the recorded history of a session, in server order.
    ///
    /// Returns [`crate::ClientError::SessionNotFound`] when the backend
    /// answers 404.
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Send one user message.
    ///
    /// `Ok` whenever the backend answered with a decodable body, regardless of
    /// status. `Err` when no usable response was obtained.
    async fn send_message(&self, request: &SendMessageRequest) -> Result<SendReply>;
}
