//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_LEVEL_ENV: &str = "COZY_LOG_LEVEL";

/// Log level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Cozy - chat with Cozy Cart support from the terminal
///
/// Resumes the last conversation unless `--new` is given. Type `/new` to start
/// over and `/quit` to leave.
#[derive(Debug, Parser)]
#[command(name = "cozy")]
#[command(author, version)]
#[command(about = "Cozy Cart support chat", long_about = None)]
pub struct Cli {
    /// Backend URL (overrides the config file and COZY_API_URL)
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the saved session and logs
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Forget the saved session and start a new conversation
    #[arg(long = "new")]
    pub new_conversation: bool,

    /// Keep the session in memory only; nothing is saved
    #[arg(long = "ephemeral")]
    pub ephemeral: bool,

    /// Set log verbosity level (falls back to COZY_LOG_LEVEL, then warn)
    #[arg(
        long = "log-level",
        short = 'L',
        value_enum,
        help_heading = "Debugging"
    )]
    pub log_level: Option<LogLevel>,

    /// Enable debug mode: writes ALL trace-level logs to <data dir>/logs/debug.log
    #[arg(long = "debug", help_heading = "Debugging")]
    pub debug: bool,
}

impl Cli {
    /// The flag wins, then the environment, then the default.
    pub fn resolve_log_level(&self, env_level: Option<&str>) -> LogLevel {
        self.log_level
            .or_else(|| env_level.and_then(LogLevel::from_str_loose))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cozy"]);
        assert_eq!(cli.api_url, None);
        assert!(!cli.new_conversation);
        assert!(!cli.ephemeral);
        assert!(!cli.debug);
        assert_eq!(cli.resolve_log_level(None), LogLevel::Warn);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "cozy",
            "--api-url",
            "http://10.0.0.2:3001",
            "--data-dir",
            "/tmp/cozy",
            "--new",
            "-L",
            "debug",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.2:3001"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cozy")));
        assert!(cli.new_conversation);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::parse_from(["cozy"]);
        assert_eq!(cli.resolve_log_level(Some("TRACE")), LogLevel::Trace);
        assert_eq!(cli.resolve_log_level(Some("loud")), LogLevel::Warn);

        let cli = Cli::parse_from(["cozy", "--log-level", "error"]);
        assert_eq!(cli.resolve_log_level(Some("trace")), LogLevel::Error);
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(LogLevel::from_str_loose("Warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose(" info "), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str_loose("verbose"), None);
    }
}
