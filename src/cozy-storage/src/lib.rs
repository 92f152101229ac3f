//! Cozy Storage - where the chat session survives restarts.
//!
//! The conversation manager only needs a single string-keyed slot holding the
//! current session id. This crate provides that capability as the
//! [`KeyValueStore`] trait with two implementations:
//!
//! - [`MemoryStore`]: process-local, used in tests and for `--ephemeral` runs.
//! - [`FileStore`]: a small JSON object on disk in the OS data directory.
//!
//! Data directory by platform:
//!
//! - **Windows**: `%APPDATA%\Cozy\`
//! - **macOS**: `~/Library/Application Support/Cozy/`
//! - **Linux**: `~/.local/share/Cozy/`
//!
//! # Usage
//!
//! ```rust,no_run
//! use cozy_storage::{FileStore, KeyValueStore};
//!
//! fn main() -> cozy_storage::Result<()> {
//!     let store = FileStore::open_default()?;
//!     store.set("chat_session_id", "s-1")?;
//!     assert_eq!(store.get("chat_session_id")?.as_deref(), Some("s-1"));
//!     store.remove("chat_session_id")?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file_store;
pub mod paths;
pub mod store;

pub use error::{Result, StorageError};
pub use file_store::FileStore;
pub use paths::{CozyPaths, cozy_config_dir, cozy_data_dir};
pub use store::{KeyValueStore, MemoryStore};
