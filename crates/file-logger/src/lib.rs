//! File Logger
//!
//! Appends one line per call to a text file:
//!
//! ```text
//! <message> : <timestamp> <file>:<line>
//! ```
//!
//! The file and line are the caller's, captured with `#[track_caller]`.
//! The file is opened, written, flushed and closed on every call, and a log
//! file that cannot be opened is skipped without reporting an error.

mod config;
mod entry;
mod error;
mod logger;

pub use config::LoggerConfig;
pub use entry::{Level, LogEntry, LINE_ENDING};
pub use error::{LoggerError, Result};
pub use logger::{FileLogger, DEFAULT_DATE_FORMAT, DEFAULT_LOG_FILE};
