//! Cozy Core - the conversation manager behind the support chat.
//!
//! [`ConversationManager`] owns the transcript, the session id and the loading
//! flag. It talks to the backend through [`cozy_client::ChatBackend`] and keeps
//! the session id in a [`cozy_storage::KeyValueStore`]; both are injected.
//!
//! Front ends read state through [`ConversationView`] (a snapshot, or a
//! `watch` subscription) and drive it with [`ConversationManager::send`] and
//! [`ConversationManager::reset`]. Transient notices are collected with
//! [`ConversationManager::drain_notices`].

pub mod config;
pub mod error;
pub mod input;
pub mod manager;
pub mod message;
pub mod notice;
pub mod outcome;
mod reconcile;
pub mod session;
pub mod transcript;

pub use config::{ChatConfig, ConfigError, DEFAULT_SESSION_KEY};
pub use error::ConversationError;
pub use input::{InputError, MAX_MESSAGE_CHARS, PreparedInput, prepare_input};
pub use manager::{ConversationManager, ConversationView};
pub use message::Message;
pub use notice::{Notice, NoticeLevel};
pub use outcome::{HydrationOutcome, SendOutcome};
pub use session::SessionSlot;
pub use transcript::Transcript;

pub use cozy_protocol::Sender;
