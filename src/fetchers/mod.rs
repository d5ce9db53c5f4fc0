use crate::error::ImportError;
use async_trait::async_trait;

mod request;

pub use request::RequestFetcher;

/// Something that can turn a URL into page HTML.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Page body, or `HttpStatus` when the server does not answer 2xx.
    async fn fetch(&self, url: &str) -> Result<String, ImportError>;

    /// Page body whatever the response status. Only transport failures are
    /// errors.
    async fn fetch_any_status(&self, url: &str) -> Result<String, ImportError> {
        self.fetch(url).await
    }
}
