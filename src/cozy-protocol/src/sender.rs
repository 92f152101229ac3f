//! Message author.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message.
///
/// The backend calls the agent side `"ai"`; `"agent"` is accepted on input too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// The person typing into the chat.
    #[serde(rename = "user")]
    User,
    /// The support agent, or a locally synthesized stand-in for it.
    #[serde(rename = "ai", alias = "agent")]
    Agent,
}

impl Sender {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "ai",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
