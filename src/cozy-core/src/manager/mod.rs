//! The conversation manager.
//!
//! Owns the transcript, the active session id and the loading flag. All of it
//! lives behind one lock; network calls are made with the lock released and
//! their results are applied against whatever the state is when they land.


use std::sync::Arc;

use cozy_client::ChatBackend;
use cozy_protocol::SendMessageRequest;
use cozy_storage::KeyValueStore;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_SESSION_KEY;
use crate::error::ConversationError;
use crate::input::prepare_input;
use crate::message::Message;
use crate::notice::{NEW_CONVERSATION_NOTICE, Notice};
use crate::outcome::{HydrationOutcome, SendOutcome};
use crate::reconcile::{ReplyKind, reconcile};
use crate::session::SessionSlot;
use crate::transcript::Transcript;

/// What a front end renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    /// A send is in flight. Input should be refused while set.
    pub loading: bool,
}

struct ConversationState {
    transcript: Transcript,
    session_id: Option<String>,
    loading: bool,
    /// Bumped on every reset. Requests started under an older epoch are
    /// ignored when they complete.
    epoch: u64,
    notices: Vec<Notice>,
}

impl ConversationState {
    fn view(&self) -> ConversationView {
        ConversationView {
            messages: self.transcript.messages().to_vec(),
            loading: self.loading,
        }
    }
}

pub struct ConversationManager {
    backend: Arc<dyn ChatBackend>,
    slot: SessionSlot,
    state: RwLock<ConversationState>,
    view_tx: watch::Sender<ConversationView>,
}

impl ConversationManager {
    pub fn new(backend: Arc<dyn ChatBackend>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_session_key(backend, store, DEFAULT_SESSION_KEY)
    }

    pub fn with_session_key(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn KeyValueStore>,
        session_key: impl Into<String>,
    ) -> Self {
        let state = ConversationState {
            transcript: Transcript::new(),
            session_id: None,
            loading: false,
            epoch: 0,
            notices: Vec::new(),
        };
        let (view_tx, _) = watch::channel(state.view());
        Self {
            backend,
            slot: SessionSlot::new(store, session_key),
            state: RwLock::new(state),
            view_tx,
        }
    }

    /// Snapshot of the transcript and loading flag.
    pub fn view(&self) -> ConversationView {
        self.view_tx.borrow().clone()
    }

    /// Receive every published view.
    pub fn subscribe(&self) -> watch::Receiver<ConversationView> {
        self.view_tx.subscribe()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.view_tx.borrow().messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view_tx.borrow().loading
    }

    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    /// Take the notices raised since the last call, oldest first.
    pub async fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }

    /// Pick up the persisted session, if any, and load its history.
    pub async fn resume(&self) -> HydrationOutcome {
        let Some(session_id) = self.slot.load() else {
            debug!("No persisted session, starting fresh");
            return HydrationOutcome::NoSession;
        };

        let epoch = {
            let mut state = self.state.write().await;
            state.session_id = Some(session_id.clone());
            state.epoch
        };
        info!(session_id = %session_id, "Resuming session");
        self.hydrate(&session_id, epoch).await
    }

    async fn hydrate(&self, session_id: &str, epoch: u64) -> HydrationOutcome {
        let result = self.backend.fetch_history(session_id).await;

        let mut state = self.state.write().await;
        if state.epoch != epoch || state.session_id.as_deref() != Some(session_id) {
            debug!(session_id, "Conversation moved on, dropping history");
            return HydrationOutcome::Discarded;
        }

        match result {
            Ok(history) if history.is_empty() => {
                debug!(session_id, "Session has no history");
                HydrationOutcome::Empty
            }
            Ok(history) => {
                let count = history.len();
                state
                    .transcript
                    .hydrate(history.into_iter().map(Message::from).collect());
                self.publish(&state);
                debug!(session_id, count, "Restored history");
                HydrationOutcome::Restored { count }
            }
            Err(e) if e.is_session_not_found() => {
                info!(session_id, "Session unknown to backend, forgetting it");
                state.session_id = None;
                self.slot.clear();
                let err = ConversationError::SessionExpired(session_id.to_string());
                HydrationOutcome::Failed(err)
            }
            Err(e) => {
                warn!(session_id, error = %e, "Failed to load history");
                HydrationOutcome::Failed(ConversationError::HydrationFailure(e.to_string()))
            }
        }
    }

    /// Start a new conversation. Makes no network call.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.epoch += 1;
        state.session_id = None;
        state.transcript.reset();
        state.notices.push(Notice::success(NEW_CONVERSATION_NOTICE));
        self.slot.clear();
        self.publish(&state);
        info!(epoch = state.epoch, "Started a new conversation");
    }

    /// Make `session_id` the active session and persist it.
    ///
    /// Returns whether anything changed. Empty and already-held ids are
    /// ignored.
    pub async fn adopt(&self, session_id: &str) -> bool {
        let mut state = self.state.write().await;
        self.adopt_locked(&mut state, session_id)
    }

    fn adopt_locked(&self, state: &mut ConversationState, session_id: &str) -> bool {
        if session_id.is_empty() || state.session_id.as_deref() == Some(session_id) {
            return false;
        }
        info!(session_id, "Adopting session");
        state.session_id = Some(session_id.to_string());
        self.slot.save(session_id);
        true
    }

    /// Send one user message and reconcile the response into the transcript.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let prepared = match prepare_input(text) {
            Ok(prepared) => prepared,
            Err(err) => {
                self.state
                    .write()
                    .await
                    .notices
                    .push(Notice::error(err.to_string()));
                return SendOutcome::Rejected(err);
            }
        };

        let (request, epoch) = {
            let mut state = self.state.write().await;
            if state.loading {
                debug!("Send already in flight, refusing");
                return SendOutcome::Busy;
            }
            if prepared.truncated {
                state.notices.push(Notice::truncated());
            }
            state.transcript.push(Message::user(prepared.text.clone()));
            state.loading = true;
            self.publish(&state);
            (
                SendMessageRequest::new(prepared.text, state.session_id.clone()),
                state.epoch,
            )
        };

        debug!(
            chars = request.message.chars().count(),
            session_id = ?request.session_id,
            "Sending message"
        );
        let reconciled = reconcile(self.backend.send_message(&request).await);

        let mut state = self.state.write().await;
        state.loading = false;
        if state.epoch != epoch {
            debug!("Conversation was reset, dropping response");
            self.publish(&state);
            return SendOutcome::Discarded;
        }

        if let Some(session_id) = reconciled.adopt.as_deref() {
            self.adopt_locked(&mut state, session_id);
        }
        if let Some(notice) = reconciled.notice {
            state.notices.push(notice);
        }
        state.transcript.push(reconciled.message.clone());
        self.publish(&state);

        let message = reconciled.message;
        match reconciled.kind {
            ReplyKind::Replied => SendOutcome::Replied(message),
            ReplyKind::ServerRejected { status } => SendOutcome::ServerRejected { status, message },
            ReplyKind::TransportFailed { cause } => SendOutcome::TransportFailed { cause, message },
        }
    }

    fn publish(&self, state: &ConversationState) {
        self.view_tx.send_replace(state.view());
    }
}

impl std::fmt::Debug for ConversationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationManager")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
