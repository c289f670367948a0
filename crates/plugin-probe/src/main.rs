//! Plugin probe
//!
//! Fetches `PROBE_URL` through the remote request helper, caches the
//! response in a transient cache and records each run in the file log.

mod error;
mod probe;

use crate::error::{ProbeError, Result};
use crate::probe::{Probe, ProbeConfig};
use file_logger::{FileLogger, LoggerConfig};
use remote_request::{RemoteRequest, RequestConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use transient_cache::{CacheConfig, Transient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("plugin_probe=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let probe_config = ProbeConfig::from_env()
        .ok_or_else(|| ProbeError::Config("PROBE_URL is not set".to_string()))?;
    let cache_config = CacheConfig::from_env();
    let request_config = RequestConfig::from_env();
    let logger_config = LoggerConfig::from_env();

    info!("URL: {}", probe_config.url);
    info!("Cache dir: {:?}", cache_config.cache_dir);
    info!("Cache TTL: {} seconds", probe_config.cache_ttl_secs);
    info!("Log file: {:?}", logger_config.log_file);

    // Long-lived handles, built once
    let cache = Transient::new(cache_config.build_store().await?);
    let http = RemoteRequest::with_config(&request_config)
        .map_err(|e| ProbeError::Config(format!("HTTP client: {}", e)))?;
    let logger = Arc::new(FileLogger::with_config(&logger_config)?);

    let probe = Probe {
        cache: &cache,
        http: &http,
        logger: &logger,
    };
    let outcome = probe.fetch(&probe_config).await?;

    info!(
        from_cache = outcome.from_cache,
        bytes = outcome.body.len(),
        "Probe complete"
    );
    println!("{}", outcome.body);

    Ok(())
}
