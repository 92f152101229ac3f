//! Client for the Cozy support chat backend
//!
//! [`ChatBackend`] is the capability the conversation manager talks to;
//! [`HttpChatBackend`] implements it over HTTP with reqwest.

mod backend;
mod http_backend;
pub mod http_client;

pub use backend::{ChatBackend, SendReply};
pub use http_backend::HttpChatBackend;

/// Default backend URL when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Error types for backend calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend does not know the session (history lookup returned 404).
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The backend answered with a non-success status where a body was required.
    #[error("Server returned error: {status} - {body}")]
    ServerError { status: u16, body: String },

    /// The request could not be completed (connect, timeout, IO).
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot address the backend endpoints.
    #[error("Invalid API URL: {0}")]
    InvalidBaseUrl(String),

    #[error("{0}")]
    Setup(String),
}

impl ClientError {
    /// Whether this error means the session is unknown to the backend.
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, ClientError::SessionNotFound(_))
    }
}

/// Result type for backend calls
pub type Result<T> = std::result::Result<T, ClientError>;
