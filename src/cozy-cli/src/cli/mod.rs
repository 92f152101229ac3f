//! CLI definitions and the chat command.

pub mod args;
pub mod handlers;

pub use args::{Cli, LOG_LEVEL_ENV, LogLevel};
pub use handlers::{data_paths, open_store, resolve_config, run};
