//! Cozy CLI library.
//!
//! The `cozy` binary is a thin wrapper over [`cli::run`]: it parses flags,
//! installs logging and hands stdin/stdout to the chat loop in [`repl`].

pub mod cli;
pub mod logging;
pub mod repl;

pub use cli::{Cli, LogLevel, run};
