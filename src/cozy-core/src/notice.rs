//! Transient notifications for the user.

use std::fmt;

use crate::input::MAX_MESSAGE_CHARS;

pub const NEW_CONVERSATION_NOTICE: &str = "Started a new conversation";
pub const NETWORK_ERROR_NOTICE: &str = "Network error. Please check your connection and try again.";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeLevel {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// ASCII marker for terminal output.
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "[+]",
            NoticeLevel::Info => "[i]",
            NoticeLevel::Warning => "[!]",
            NoticeLevel::Error => "[x]",
        }
    }
}

/// A short message to show once, outside the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn truncated() -> Self {
        Self::warning(format!(
            "Message truncated to {MAX_MESSAGE_CHARS} characters"
        ))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}
