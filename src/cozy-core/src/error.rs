//! Failure taxonomy of the conversation manager.
//!
//! None of these escape the manager: each one resolves into a notice, a
//! synthetic transcript message, a log line, or a combination of those.

use thiserror::Error;

use crate::input::InputError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    /// The user submitted nothing. Notice only, transcript untouched.
    #[error("Validation failed: {0}")]
    Validation(#[from] InputError),

    /// History lookup reported the session unknown. Session silently dropped.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// The backend answered a send with a failure status.
    #[error("Server rejected the message (status {status}): {message}")]
    ServerRejected { status: u16, message: String },

    /// No usable response to a send.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Any history failure other than an unknown session. Logged only.
    #[error("History hydration failed: {0}")]
    HydrationFailure(String),
}

impl ConversationError {
    /// Whether the user is told about this failure.
    pub fn is_user_visible(&self) -> bool {
        !matches!(
            self,
            ConversationError::SessionExpired(_) | ConversationError::HydrationFailure(_)
        )
    }
}
