//! OS-aware path detection for Cozy storage.
//!
//! - **Windows**: `%APPDATA%\Cozy\`
//! - **macOS**: `~/Library/Application Support/Cozy/`
//! - **Linux**: `~/.local/share/Cozy/` for data, `~/.config/Cozy/` for config
//!
//! `COZY_DATA_DIR` and `COZY_CONFIG_DIR` override the detected locations.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, StorageError};

/// Application name used for storage directories.
pub const APP_NAME: &str = "Cozy";

/// File holding persisted key/value pairs.
pub const STATE_FILE: &str = "state.json";
pub const LOGS_DIR: &str = "logs";
pub const CONFIG_FILE: &str = "config.toml";

/// Cozy storage paths container.
#[derive(Debug, Clone)]
pub struct CozyPaths {
    /// Root data directory (platform-specific).
    pub data_dir: PathBuf,
    /// Persisted key/value state.
    pub state_file: PathBuf,
    /// Debug log files.
    pub logs_dir: PathBuf,
}

impl CozyPaths {
    /// Create CozyPaths with automatic OS detection.
    pub fn new() -> Result<Self> {
        let data_dir = cozy_data_dir()?;
        Ok(Self::from_root(data_dir))
    }

    /// Create CozyPaths from a custom root directory.
    pub fn from_root(data_dir: PathBuf) -> Self {
        Self {
            state_file: data_dir.join(STATE_FILE),
            logs_dir: data_dir.join(LOGS_DIR),
            data_dir,
        }
    }

    /// Ensure all directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.logs_dir)?;
        debug!(data_dir = %self.data_dir.display(), "Cozy storage directories initialized");
        Ok(())
    }
}

/// Get the Cozy data directory based on the current OS.
pub fn cozy_data_dir() -> Result<PathBuf> {
    if let Some(path) = env_override("COZY_DATA_DIR") {
        debug!(path = %path.display(), "Using COZY_DATA_DIR override");
        return Ok(path);
    }

    let base = dirs::data_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

/// Get the Cozy config directory based on the current OS.
pub fn cozy_config_dir() -> Result<PathBuf> {
    if let Some(path) = env_override("COZY_CONFIG_DIR") {
        debug!(path = %path.display(), "Using COZY_CONFIG_DIR override");
        return Ok(path);
    }

    let base = dirs::config_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

fn env_override(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cozy_data_dir() {
        if let Ok(path) = cozy_data_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_env_override() {
        let test_path = std::env::temp_dir().join("test-cozy-data");
        // SAFETY: serialized with the other env-reading tests in this module
        unsafe {
            std::env::set_var("COZY_DATA_DIR", &test_path);
        }
        let resolved = cozy_data_dir().unwrap();
        unsafe {
            std::env::remove_var("COZY_DATA_DIR");
        }
        assert_eq!(resolved, test_path);
    }

    #[test]
    #[serial]
    fn test_empty_override_is_ignored() {
        // SAFETY: serialized with the other env-reading tests in this module
        unsafe {
            std::env::set_var("COZY_CONFIG_DIR", "");
        }
        let resolved = cozy_config_dir();
        unsafe {
            std::env::remove_var("COZY_CONFIG_DIR");
        }
        if let Ok(path) = resolved {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_paths_structure() {
        let paths = CozyPaths::from_root(PathBuf::from("/tmp/cozy-root"));
        assert!(paths.state_file.ends_with(STATE_FILE));
        assert!(paths.logs_dir.ends_with(LOGS_DIR));
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/cozy-root"));
    }

    #[test]
    fn test_ensure_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CozyPaths::from_root(dir.path().join("nested"));
        paths.ensure_dirs().unwrap();
        assert!(paths.data_dir.is_dir());
        assert!(paths.logs_dir.is_dir());
    }
}
