use std::fs::OpenOptions;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use chrono::Local;
use tracing::{debug, trace};

use crate::config::LoggerConfig;
use crate::entry::{validate_date_format, Level, LogEntry};
use crate::error::Result;

pub const DEFAULT_LOG_FILE: &str = "log.txt";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
struct Settings {
    log_file: PathBuf,
    date_format: String,
}

/// Appends leveled lines to a log file
///
/// Create one at startup and share it (e.g. behind an `Arc`). The setters
/// take `&self` so a shared logger can be reconfigured; later calls pick up
/// the new file or format.
#[derive(Debug)]
pub struct FileLogger {
    settings: RwLock<Settings>,
}

impl FileLogger {
    /// Logger writing to `log.txt` with `%Y-%m-%d %H:%M:%S` timestamps
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(Settings {
                log_file: PathBuf::from(DEFAULT_LOG_FILE),
                date_format: DEFAULT_DATE_FORMAT.to_string(),
            }),
        }
    }

    pub fn with_config(config: &LoggerConfig) -> Result<Self> {
        let logger = Self::new();
        logger.set_log_file(&config.log_file);
        logger.set_date_format(&config.date_format)?;
        Ok(logger)
    }

    pub fn set_log_file(&self, path: impl AsRef<Path>) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .log_file = path.as_ref().to_path_buf();
    }

    /// Set the strftime pattern for timestamps; invalid patterns are rejected
    /// and the current one is kept
    pub fn set_date_format(&self, format: &str) -> Result<()> {
        validate_date_format(format)?;
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .date_format = format.to_string();
        Ok(())
    }

    pub fn log_file(&self) -> PathBuf {
        self.snapshot().log_file
    }

    pub fn date_format(&self) -> String {
        self.snapshot().date_format
    }

    #[track_caller]
    pub fn log(&self, message: impl AsRef<str>) {
        self.add_entry(Level::Log, message.as_ref(), Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.add_entry(Level::Debug, message.as_ref(), Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.add_entry(Level::Warning, message.as_ref(), Location::caller());
    }

    #[track_caller]
    pub fn notice(&self, message: impl AsRef<str>) {
        self.add_entry(Level::Notice, message.as_ref(), Location::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.add_entry(Level::Critical, message.as_ref(), Location::caller());
    }

    /// Append an entry with an explicit call site
    pub fn log_at(&self, level: Level, message: impl AsRef<str>, file: &str, line: u32) {
        self.write_entry(&LogEntry {
            level,
            message: message.as_ref().to_string(),
            timestamp: Local::now(),
            file: file.to_string(),
            line,
        });
    }

    fn add_entry(&self, level: Level, message: &str, location: &Location<'_>) {
        self.log_at(level, message, location.file(), location.line());
    }

    /// Append a prepared entry; open or write failures are dropped
    pub fn write_entry(&self, entry: &LogEntry) {
        let settings = self.snapshot();
        let content = entry.render(&settings.date_format);

        trace!(
            severity = entry.level.as_str(),
            file = %entry.file,
            line = entry.line,
            "Appending log entry"
        );

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
        {
            Ok(file) => file,
            Err(e) => {
                debug!(
                    path = ?settings.log_file,
                    error = %e,
                    "Log file unavailable, entry dropped"
                );
                return;
            }
        };

        if let Err(e) = file
            .write_all(content.as_bytes())
            .and_then(|()| file.flush())
        {
            debug!(path = ?settings.log_file, error = %e, "Failed to write log entry");
        }
    }

    fn snapshot(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}
