use std::fmt::{self, Write as _};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{LoggerError, Result};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Severity attached to each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Log,
    Debug,
    Notice,
    Warning,
    Critical,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Log => "LOG",
            Level::Debug => "DEBUG",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One appended line
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: String,
    pub line: u32,
}

impl LogEntry {
    /// Render as `<message> : <timestamp> <file>:<line>` plus line ending
    ///
    /// `date_format` must already have passed [`validate_date_format`].
    pub fn render(&self, date_format: &str) -> String {
        let mut out = String::with_capacity(self.message.len() + self.file.len() + 32);
        let _ = write!(
            out,
            "{} : {} {}:{}{}",
            self.message,
            self.timestamp
                .format_with_items(StrftimeItems::new(date_format)),
            self.file,
            self.line,
            LINE_ENDING
        );
        out
    }
}

/// Reject strftime patterns chrono cannot render
pub(crate) fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}
