//! Error types for the file logger

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggerError {
    InvalidDateFormat(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::InvalidDateFormat(format) => {
                write!(f, "Invalid date format: {}", format)
            }
        }
    }
}

impl std::error::Error for LoggerError {}

pub type Result<T> = std::result::Result<T, LoggerError>;
