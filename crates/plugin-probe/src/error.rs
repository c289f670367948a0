//! Error types for the plugin probe

use std::fmt;

#[derive(Debug)]
pub enum ProbeError {
    Cache(transient_cache::CacheError),
    Http(remote_request::HttpError),
    Logger(file_logger::LoggerError),
    Config(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Cache(err) => write!(f, "Cache error: {}", err),
            ProbeError::Http(err) => write!(f, "HTTP error: {}", err),
            ProbeError::Logger(err) => write!(f, "Logger error: {}", err),
            ProbeError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Cache(err) => Some(err),
            ProbeError::Http(err) => Some(err),
            ProbeError::Logger(err) => Some(err),
            ProbeError::Config(_) => None,
        }
    }
}

impl From<transient_cache::CacheError> for ProbeError {
    fn from(err: transient_cache::CacheError) -> Self {
        ProbeError::Cache(err)
    }
}

impl From<remote_request::HttpError> for ProbeError {
    fn from(err: remote_request::HttpError) -> Self {
        ProbeError::Http(err)
    }
}

impl From<file_logger::LoggerError> for ProbeError {
    fn from(err: file_logger::LoggerError) -> Self {
        ProbeError::Logger(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProbeError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ProbeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ProbeError::from(remote_request::HttpError::request_failed("Not Found", 404));
        assert_eq!(format!("{}", err), "HTTP error: Request failed (404): Not Found");
    }

    #[test]
    fn test_config_error_display() {
        let err = ProbeError::Config("missing PROBE_URL".to_string());
        assert_eq!(format!("{}", err), "Configuration error: missing PROBE_URL");
        assert!(std::error::Error::source(&err).is_none());
    }
}
