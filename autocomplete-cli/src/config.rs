//! CLI settings read from the environment.

use std::env;
use std::path::PathBuf;

use simplelog::LevelFilter;

/// Environment variable naming the log file.
pub const LOG_FILE_VAR: &str = "AUTOCOMPLETE_LOG_FILE";
/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "AUTOCOMPLETE_LOG_LEVEL";

/// Errors in the CLI environment settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The log level is not one of off/error/warn/info/debug/trace.
    #[error("invalid AUTOCOMPLETE_LOG_LEVEL {0:?}")]
    InvalidLogLevel(String),
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Where log output goes. Logs never share the terminal with the dropdown.
    pub log_file: PathBuf,
    /// Maximum level written.
    pub log_level: LevelFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("autocomplete-cli.log"),
            log_level: LevelFilter::Debug,
        }
    }
}

impl CliConfig {
    /// Reads settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(env::var(LOG_FILE_VAR).ok(), env::var(LOG_LEVEL_VAR).ok())
    }

    fn from_vars(log_file: Option<String>, log_level: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = log_file.filter(|p| !p.is_empty()) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(level) = log_level {
            config.log_level = level
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?;
        }
        Ok(config)
    }
}
