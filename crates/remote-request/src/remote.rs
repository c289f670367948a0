use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::config::RequestConfig;
use crate::error::{HttpError, Result};
use crate::handler::RequestHandler;
use crate::options::{RequestOptions, Verb};
use crate::transport::{ReqwestTransport, Transport};

/// Timeout applied when neither the handler nor the call sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request handler that dispatches through a [`Transport`]
pub struct RemoteRequest<T = ReqwestTransport> {
    transport: T,
    timeout: Duration,
}

impl RemoteRequest<ReqwestTransport> {
    /// Create a handler over a default reqwest transport
    pub fn new() -> reqwest::Result<Self> {
        Self::with_config(&RequestConfig::default())
    }

    pub fn with_config(config: &RequestConfig) -> reqwest::Result<Self> {
        let transport = ReqwestTransport::with_config(config)?;
        Ok(Self::with_transport(transport).with_timeout(config.timeout))
    }
}

impl<T: Transport> RemoteRequest<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the default timeout for calls that don't set their own
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Only plain web URLs may leave the process
fn validate_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|e| HttpError::request_failed(format!("Invalid URL {url}: {e}"), 0))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(HttpError::request_failed(
            format!("Unsupported URL scheme: {scheme}"),
            0,
        )),
    }
}

#[async_trait]
impl<T: Transport> RequestHandler for RemoteRequest<T> {
    async fn execute(&self, url: &str, options: RequestOptions) -> Result<String> {
        validate_url(url)?;
        let request = options.resolve(url, Verb::Get, self.timeout);

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url, method = %request.method, error = %e, "Remote request failed");
                return Err(HttpError::request_failed(e.message, 0));
            }
        };

        match response.status {
            200 | 201 => {
                debug!(
                    url,
                    method = %request.method,
                    status = response.status,
                    "Remote request succeeded"
                );
                // The body goes back out as a JSON string literal
                serde_json::to_string(&response.body)
                    .map_err(|e| HttpError::request_failed(e.to_string(), response.status))
            }
            status => {
                warn!(
                    url,
                    method = %request.method,
                    status,
                    "Remote request returned error status"
                );
                Err(HttpError::request_failed(response.message, status))
            }
        }
    }
}
