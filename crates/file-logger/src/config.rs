use std::path::PathBuf;

use crate::logger::{DEFAULT_DATE_FORMAT, DEFAULT_LOG_FILE};

/// Initial settings for a [`FileLogger`](crate::FileLogger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub log_file: PathBuf,
    /// chrono strftime pattern
    pub date_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Read `LOG_FILE` and `LOG_DATE_FORMAT`
    pub fn from_env() -> Self {
        let log_file = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let date_format = std::env::var("LOG_DATE_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        Self {
            log_file,
            date_format,
        }
    }
}
