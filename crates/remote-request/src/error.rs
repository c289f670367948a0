//! Error types for remote requests

use std::fmt;

/// A request that did not produce a 200/201 response
///
/// Transport failures carry code 0; HTTP failures carry the response status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    RequestFailed { message: String, code: u16 },
}

impl HttpError {
    pub fn request_failed(message: impl Into<String>, code: u16) -> Self {
        HttpError::RequestFailed {
            message: message.into(),
            code,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            HttpError::RequestFailed { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::RequestFailed { message, .. } => message,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::RequestFailed { message, code } => {
                write!(f, "Request failed ({}): {}", code, message)
            }
        }
    }
}

impl std::error::Error for HttpError {}

pub type Result<T> = std::result::Result<T, HttpError>;
