//! Wiring configuration, storage and the backend into a chat session.

use std::sync::Arc;

use anyhow::{Context, Result};
use cozy_client::HttpChatBackend;
use cozy_core::{ChatConfig, ConversationManager};
use cozy_storage::{CozyPaths, FileStore, KeyValueStore, MemoryStore};
use tokio::io::BufReader;
use tracing::{debug, info};

use super::args::Cli;
use crate::repl;

/// Layer the config file, the environment and the flags, in that order.
pub fn resolve_config(cli: &Cli) -> Result<ChatConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ChatConfig::load_from(path)?;
            config.apply_env();
            config
        }
        None => ChatConfig::load()?,
    };

    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Data directory layout: `data_dir` from the layered config, else the OS
/// default.
pub fn data_paths(config: &ChatConfig) -> Result<CozyPaths> {
    Ok(match &config.data_dir {
        Some(dir) => CozyPaths::from_root(dir.clone()),
        None => CozyPaths::new()?,
    })
}

/// Where the session id is kept for this run.
pub fn open_store(cli: &Cli, config: &ChatConfig) -> Result<Arc<dyn KeyValueStore>> {
    if cli.ephemeral {
        debug!("Ephemeral mode, session kept in memory");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let paths = data_paths(config)?;
    paths
        .ensure_dirs()
        .with_context(|| format!("Cannot create {}", paths.data_dir.display()))?;
    debug!(path = %paths.state_file.display(), "Using session file");
    Ok(Arc::new(FileStore::in_dir(&paths)))
}

/// Run an interactive chat on stdin/stdout until `/quit` or end of input.
pub async fn run(cli: Cli, config: ChatConfig) -> Result<()> {
    let store = open_store(&cli, &config)?;
    let backend = HttpChatBackend::with_timeout(&config.api_url, config.request_timeout())
        .with_context(|| format!("Cannot use backend at {}", config.api_url))?;
    info!(api_url = %config.api_url, "Connecting to support chat");

    let manager =
        ConversationManager::with_session_key(Arc::new(backend), store, config.session_key.clone());

    if cli.new_conversation {
        manager.reset().await;
    } else {
        let outcome = manager.resume().await;
        match outcome.error() {
            Some(err) => debug!(error = %err, "Starting without history"),
            None => debug!(?outcome, "Conversation ready"),
        }
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run_chat(&manager, stdin, &mut stdout).await
}
