//! Results of the manager's asynchronous operations.

use crate::error::ConversationError;
use crate::input::InputError;
use crate::message::Message;

/// How a call to `send` resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was rejected locally; nothing was appended or sent.
    Rejected(InputError),
    /// Another send is still in flight; nothing was appended or sent.
    Busy,
    /// The backend replied; the reply was appended.
    Replied(Message),
    /// The backend answered with a failure status; a synthetic message was
    /// appended.
    ServerRejected { status: u16, message: Message },
    /// No usable response; a synthetic message was appended.
    TransportFailed { cause: String, message: Message },
    /// The conversation was reset while the request was in flight; the
    /// response was dropped.
    Discarded,
}

impl SendOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, SendOutcome::Replied(_))
    }

    /// The agent-side message appended by this send, if any.
    pub fn agent_message(&self) -> Option<&Message> {
        match self {
            SendOutcome::Replied(message)
            | SendOutcome::ServerRejected { message, .. }
            | SendOutcome::TransportFailed { message, .. } => Some(message),
            SendOutcome::Rejected(_) | SendOutcome::Busy | SendOutcome::Discarded => None,
        }
    }

    pub fn error(&self) -> Option<ConversationError> {
        match self {
            SendOutcome::Rejected(err) => Some(ConversationError::Validation(err.clone())),
            SendOutcome::ServerRejected { status, message } => {
                Some(ConversationError::ServerRejected {
                    status: *status,
                    message: message.content.clone(),
                })
            }
            SendOutcome::TransportFailed { cause, .. } => {
                Some(ConversationError::TransportFailure(cause.clone()))
            }
            SendOutcome::Replied(_) | SendOutcome::Busy | SendOutcome::Discarded => None,
        }
    }
}

/// How resuming a persisted session resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// Nothing was persisted; the conversation starts fresh.
    NoSession,
    /// `count` history messages were placed after the welcome message.
    Restored { count: usize },
    /// The session exists but has no recorded messages.
    Empty,
    /// History could not be loaded and the conversation starts fresh.
    ///
    /// Carries [`ConversationError::SessionExpired`] when the backend did not
    /// know the session (it has been forgotten), and
    /// [`ConversationError::HydrationFailure`] otherwise (it is kept).
    Failed(ConversationError),
    /// The conversation moved on while history was loading.
    Discarded,
}

impl HydrationOutcome {
    pub fn error(&self) -> Option<&ConversationError> {
        match self {
            HydrationOutcome::Failed(err) => Some(err),
            HydrationOutcome::NoSession
            | HydrationOutcome::Restored { .. }
            | HydrationOutcome::Empty
            | HydrationOutcome::Discarded => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            HydrationOutcome::Failed(ConversationError::SessionExpired(_))
        )
    }
}
