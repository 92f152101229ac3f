//! Turning a send result into transcript and session changes.
//!
//! Kept free of state so every branch can be tested without a manager.

use cozy_client::{ClientError, SendReply};
use tracing::{debug, warn};

use crate::message::{CONNECT_FAILURE_TEXT, Message, SERVER_FAILURE_TEXT};
use crate::notice::{NETWORK_ERROR_NOTICE, Notice};

/// Which branch of the protocol a send resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReplyKind {
    Replied,
    ServerRejected { status: u16 },
    TransportFailed { cause: String },
}

/// Everything the manager applies once a send has resolved.
#[derive(Debug, Clone)]
pub(crate) struct Reconciliation {
    /// Session id carried by the response, if any.
    pub adopt: Option<String>,
    /// The single agent-side message to append.
    pub message: Message,
    pub notice: Option<Notice>,
    pub kind: ReplyKind,
}

pub(crate) fn reconcile(result: Result<SendReply, ClientError>) -> Reconciliation {
    match result {
        Ok(reply) => {
            let adopt = reply.body.session_id().map(str::to_string);
            match (reply.success, reply.body.reply()) {
                (true, Some(text)) => {
                    debug!(status = reply.status, "Backend replied");
                    Reconciliation {
                        adopt,
                        message: Message::agent_reply(text),
                        notice: None,
                        kind: ReplyKind::Replied,
                    }
                }
                (success, _) => {
                    let text = reply.body.error().unwrap_or(SERVER_FAILURE_TEXT);
                    warn!(
                        status = reply.status,
                        success,
                        error = text,
                        "Backend did not reply to message"
                    );
                    Reconciliation {
                        adopt,
                        message: Message::agent_error(text),
                        notice: Some(Notice::error(text)),
                        kind: ReplyKind::ServerRejected {
                            status: reply.status,
                        },
                    }
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Failed to reach backend");
            Reconciliation {
                adopt: None,
                message: Message::agent_error(CONNECT_FAILURE_TEXT),
                notice: Some(Notice::error(NETWORK_ERROR_NOTICE)),
                kind: ReplyKind::TransportFailed {
                    cause: e.to_string(),
                },
            }
        }
    }
}
