//! Tracing setup.
//!
//! Logs go to stderr so they never interleave with the transcript. With
//! `--debug` everything down to trace level goes to a file instead.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use cozy_core::ChatConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, LOG_LEVEL_ENV, LogLevel, data_paths};

/// Crates whose logs follow the chosen level. Everything else stays at error.
const COZY_TARGETS: &[&str] = &["cozy_cli", "cozy_core", "cozy_client", "cozy_storage"];

/// Guard that ensures the debug log file is flushed when dropped.
pub struct DebugLogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Filter directives for `level`.
pub fn filter_directives(level: LogLevel) -> String {
    let level = level.as_filter_str();
    let mut directives = String::from("error");
    for target in COZY_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Debug log file, next to the session file.
pub fn debug_log_path(config: &ChatConfig) -> Result<PathBuf> {
    Ok(data_paths(config)?.logs_dir.join("debug.log"))
}

/// Install the global subscriber. Keep the returned guard alive until exit.
pub fn init(cli: &Cli, config: &ChatConfig) -> Result<Option<DebugLogGuard>> {
    if cli.debug {
        return setup_debug_file_logging(debug_log_path(config)?).map(Some);
    }

    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = cli.resolve_log_level(env_level.as_deref());
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(filter_directives(level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
    Ok(None)
}

fn setup_debug_file_logging(path: PathBuf) -> Result<DebugLogGuard> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&path).map_err(|e| {
        anyhow!(
            "Failed to create {}: {e}. Check write permissions.",
            path.display()
        )
    })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(EnvFilter::new("trace"))
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))?;

    eprintln!("Debug mode enabled: logging to {}", path.display());

    Ok(DebugLogGuard { _guard: guard })
}
