//! Cozy Protocol - Wire types for the support chat backend
//!
//! The backend exposes two endpoints:
//!
//! - `GET /chat/history/{session_id}` returning a [`HistoryResponse`], or 404
//!   when the session is unknown.
//! - `POST /chat/message` taking a [`SendMessageRequest`] and returning a
//!   [`SendMessageResponse`]. A non-success status marks the exchange as failed.

pub mod messages;
pub mod sender;


pub use messages::{ChatMessage, HistoryResponse, SendMessageRequest, SendMessageResponse};
pub use sender::Sender;

/// Path of the message endpoint, relative to the API base URL.
pub const MESSAGE_PATH: &str = "/chat/message";

/// Path prefix of the history endpoint, relative to the API base URL.
pub const HISTORY_PATH: &str = "/chat/history";
