//! Transcript entries.

use chrono::{DateTime, Utc};
use cozy_protocol::{ChatMessage, Sender};
use uuid::Uuid;

/// Id of the synthetic greeting that opens every transcript.
pub const WELCOME_ID: &str = "welcome";

/// Greeting shown at the top of every conversation.
pub const WELCOME_TEXT: &str = "Hi there! Welcome to Cozy Cart support. I'm here to help with any questions about our products, shipping, returns, or anything else. How can I assist you today?";

/// Id prefix of messages typed in this run.
pub const USER_ID_PREFIX: &str = "user-";

/// Id prefix of agent messages produced in this run, replies and errors alike.
pub const AGENT_ID_PREFIX: &str = "ai-";

/// Id prefix of synthetic agent messages standing in for a failed exchange.
pub const AGENT_ERROR_ID_PREFIX: &str = "ai-error-";

/// Stand-in text when the backend rejects a message without saying why.
pub const SERVER_FAILURE_TEXT: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a moment.";

/// Stand-in text when the backend could not be reached.
pub const CONNECT_FAILURE_TEXT: &str =
    "I'm sorry, I couldn't connect to the server. Please make sure the server is running.";

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A fresh welcome message stamped with the current time.
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            sender: Sender::Agent,
            content: WELCOME_TEXT.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// An optimistic user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::live(USER_ID_PREFIX, Sender::User, content.into())
    }

    /// An agent reply returned by the backend.
    pub fn agent_reply(content: impl Into<String>) -> Self {
        Self::live(AGENT_ID_PREFIX, Sender::Agent, content.into())
    }

    /// A synthetic agent message describing a failed exchange.
    pub fn agent_error(content: impl Into<String>) -> Self {
        Self::live(AGENT_ERROR_ID_PREFIX, Sender::Agent, content.into())
    }

    fn live(prefix: &str, sender: Sender, content: String) -> Self {
        Self {
            id: format!("{prefix}{}", Uuid::new_v4()),
            sender,
            content,
            timestamp: Utc::now(),
        }
    }

    /// Whether the message was produced during this run and should be
    /// animated in. Welcome and hydrated messages are static.
    pub fn is_live(&self) -> bool {
        self.id.starts_with(USER_ID_PREFIX) || self.id.starts_with(AGENT_ID_PREFIX)
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_ID
    }

    /// Whether this is a locally synthesized failure message.
    pub fn is_synthetic_error(&self) -> bool {
        self.id.starts_with(AGENT_ERROR_ID_PREFIX)
    }
}

impl From<ChatMessage> for Message {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}
