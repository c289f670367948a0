use std::fmt;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::config::RequestConfig;
use crate::options::ResolvedRequest;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 5;

/// Raw outcome of a request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Reason phrase for the status, empty if unknown
    pub message: String,
    pub body: String,
}

/// A request that never produced a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport error: {}", self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// Sends a resolved request and reports the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: &ResolvedRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// Transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_config(&RequestConfig::default())
    }

    pub fn with_config(config: &RequestConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: &ResolvedRequest,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            url = %request.url,
            method = %request.method,
            status = status.as_u16(),
            bytes = body.len(),
            "Remote response"
        );

        Ok(TransportResponse {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{RequestOptions, Verb};
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolve(options: RequestOptions, url: String) -> ResolvedRequest {
        options.resolve(&url, Verb::Get, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_get_returns_status_and_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = resolve(
            RequestOptions::new(),
            format!("{}/feed", mock_server.uri()),
        );
        let response = transport.send(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.message, "OK");
        assert_eq!(response.body, "hello");
    }

    #[tokio::test]
    async fn test_post_forwards_headers_and_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("x-plugin-token", "abc"))
            .and(body_string("payload"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = resolve(
            RequestOptions::new()
                .method(Verb::Post)
                .header("x-plugin-token", "abc")
                .body("payload"),
            format!("{}/submit", mock_server.uri()),
        );
        let response = transport.send(&request).await.unwrap();

        assert_eq!(response.status, 201);
        assert_eq!(response.message, "Created");
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = resolve(
            RequestOptions::new().method(Verb::Head),
            mock_server.uri(),
        );
        let response = transport.send(&request).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.message, "Not Found");
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let request = RequestOptions::new()
            .timeout(Duration::from_millis(100))
            .resolve(&mock_server.uri(), Verb::Get, Duration::from_secs(5));

        let err = transport.send(&request).await.unwrap_err();
        assert!(!err.message.is_empty());
    }
}
