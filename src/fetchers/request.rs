use super::Fetcher;
use crate::config::ImportConfig;
use crate::error::ImportError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use std::time::Duration;

/// Plain HTTP GET fetcher with a hard timeout.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        Self::new(config.timeout(), &config.user_agent)
    }

    async fn get(&self, url: &str, require_success: bool) -> Result<String, ImportError> {
        let parsed = Url::parse(url).map_err(|e| ImportError::InvalidUrl(format!("{url}: {e}")))?;

        debug!("RequestFetcher: GET {}", parsed);
        let response = self.client.get(parsed).send().await.map_err(|e| {
            warn!("RequestFetcher: request to {} failed: {}", url, e);
            ImportError::Fetch(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("RequestFetcher: {} answered with status {}", url, status);
            if require_success {
                return Err(ImportError::HttpStatus(status.as_u16()));
            }
        }

        let html = response.text().await?;
        debug!("RequestFetcher: received {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ImportError> {
        self.get(url, true).await
    }

    async fn fetch_any_status(&self, url: &str) -> Result<String, ImportError> {
        self.get(url, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_user_agent() {
        let result = RequestFetcher::new(Duration::from_secs(1), "bad\nagent");
        assert!(matches!(result, Err(ImportError::Header(_))));
    }

    #[tokio::test]
    async fn test_error_status_body_is_kept_only_on_request() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("<html>Not here</html>")
            .create_async()
            .await;

        let fetcher = RequestFetcher::from_config(&ImportConfig::default()).unwrap();
        let url = format!("{}/missing", server.url());

        let strict = fetcher.fetch(&url).await;
        assert!(matches!(strict, Err(ImportError::HttpStatus(404))));

        let lenient = fetcher.fetch_any_status(&url).await.unwrap();
        assert_eq!(lenient, "<html>Not here</html>");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = RequestFetcher::from_config(&ImportConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(ImportError::InvalidUrl(_))));
    }
}
