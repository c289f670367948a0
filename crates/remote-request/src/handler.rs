use async_trait::async_trait;

use crate::error::Result;
use crate::options::{RequestOptions, Verb};

/// Request capability built on a single `execute` primitive
///
/// `head`, `get` and `post` force their verb, overriding any method already
/// set in `options`.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn execute(&self, url: &str, options: RequestOptions) -> Result<String>;

    async fn head(&self, url: &str, options: RequestOptions) -> Result<String> {
        self.execute(url, options.method(Verb::Head)).await
    }

    async fn get(&self, url: &str, options: RequestOptions) -> Result<String> {
        self.execute(url, options.method(Verb::Get)).await
    }

    async fn post(&self, url: &str, options: RequestOptions) -> Result<String> {
        self.execute(url, options.method(Verb::Post)).await
    }
}
