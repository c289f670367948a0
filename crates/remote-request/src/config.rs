use std::time::Duration;

use crate::remote::DEFAULT_TIMEOUT;

const DEFAULT_USER_AGENT: &str = concat!("remote-request-rs/", env!("CARGO_PKG_VERSION"));

/// Settings for [`RemoteRequest`](crate::RemoteRequest) and its transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RequestConfig {
    /// Read `HTTP_TIMEOUT_SECS` and `HTTP_USER_AGENT`
    pub fn from_env() -> Self {
        let timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let user_agent = std::env::var("HTTP_USER_AGENT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            timeout,
            user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RequestConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("remote-request-rs/"));
    }
}
