//! Read-through fetch: cache first, then the remote request helper

use file_logger::FileLogger;
use remote_request::{RequestHandler, RequestOptions};
use tracing::{debug, info};
use transient_cache::{CacheStore, Transient};

use crate::error::Result;

/// Result of one probe run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// JSON-encoded response body
    pub body: String,
    pub from_cache: bool,
}

/// Settings read from `PROBE_URL` and `PROBE_CACHE_TTL_SECS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub url: String,
    pub cache_ttl_secs: u64,
}

const DEFAULT_CACHE_TTL_SECS: u64 = 15 * 60;

impl ProbeConfig {
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("PROBE_URL").ok().filter(|s| !s.is_empty())?;

        let cache_ttl_secs = std::env::var("PROBE_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Some(Self {
            url,
            cache_ttl_secs,
        })
    }
}

pub fn cache_key(url: &str) -> String {
    format!("probe:{url}")
}

/// Shared handles built once at startup
pub struct Probe<'a, S, H> {
    pub cache: &'a Transient<S>,
    pub http: &'a H,
    pub logger: &'a FileLogger,
}

impl<S: CacheStore, H: RequestHandler> Probe<'_, S, H> {
    /// Return the cached body for `url`, fetching and caching it on a miss
    pub async fn fetch(&self, config: &ProbeConfig) -> Result<ProbeOutcome> {
        let key = cache_key(&config.url);

        if let Some(body) = self.cache.get_as::<String>(&key).await? {
            debug!(url = %config.url, "Serving cached response");
            self.logger.notice(format!("cache hit for {}", config.url));
            return Ok(ProbeOutcome {
                body,
                from_cache: true,
            });
        }

        let body = match self.http.get(&config.url, RequestOptions::new()).await {
            Ok(body) => body,
            Err(e) => {
                self.logger
                    .warn(format!("fetch of {} failed with code {}", config.url, e.code()));
                return Err(e.into());
            }
        };

        self.cache
            .set_as(&key, &body, config.cache_ttl_secs)
            .await?;
        self.logger.log(format!("fetched {}", config.url));
        info!(url = %config.url, bytes = body.len(), "Fetched and cached response");

        Ok(ProbeOutcome {
            body,
            from_cache: false,
        })
    }
}
