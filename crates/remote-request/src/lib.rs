//! Remote request helper
//!
//! Issues single-shot HEAD, GET and POST requests through a [`Transport`].
//! Callers program against [`RequestHandler`], whose convenience methods all
//! funnel into one `execute` call.
//!
//! # Example
//!
//! ```no_run
//! use remote_request::{RemoteRequest, RequestHandler, RequestOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RemoteRequest::new()?;
//! let body = client
//!     .get("https://example.com/feed.json", RequestOptions::default())
//!     .await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```
//!
//! A successful response (200 or 201) yields the body re-encoded as a JSON
//! string, so a plain-text body `hello` comes back as `"hello"`.

mod config;
mod error;
mod handler;
mod options;
mod remote;
mod transport;

pub use config::RequestConfig;
pub use error::{HttpError, Result};
pub use handler::RequestHandler;
pub use options::{RequestOptions, ResolvedRequest, Verb};
pub use remote::{RemoteRequest, DEFAULT_TIMEOUT};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
