//! The persisted session id.

use std::sync::Arc;

use cozy_storage::KeyValueStore;
use tracing::{debug, warn};

/// One slot of a [`KeyValueStore`] holding the current session id.
///
/// Storage failures are logged and otherwise ignored: losing the slot only
/// means the next run starts a fresh conversation.
#[derive(Clone)]
pub struct SessionSlot {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionSlot {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The persisted session id. Empty values read as absent.
    pub fn load(&self) -> Option<String> {
        match self.store.get(&self.key) {
            Ok(value) => value.filter(|id| !id.is_empty()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted session");
                None
            }
        }
    }

    pub fn save(&self, session_id: &str) {
        match self.store.set(&self.key, session_id) {
            Ok(()) => debug!(key = %self.key, session_id, "Persisted session"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist session"),
        }
    }

    pub fn clear(&self) {
        match self.store.remove(&self.key) {
            Ok(removed) => debug!(key = %self.key, removed, "Cleared persisted session"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to clear persisted session"),
        }
    }
}

impl std::fmt::Debug for SessionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSlot").field("key", &self.key).finish()
    }
}
