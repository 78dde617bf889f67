use crate::error::{FeedError, FeedResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout of [`ProxyFetcher`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Source of raw feed bodies
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FeedResult<String>;
}

/// Fetches feeds through a CORS proxy that takes the target as a URL-encoded
/// suffix, the same way the page runtime does.
pub struct ProxyFetcher {
    client: reqwest::Client,
    proxy: String,
}

impl ProxyFetcher {
    pub fn new(proxy: impl Into<String>, timeout: Duration) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| FeedError::Generic(format!("HTTP client: {}", err)))?;
        Ok(Self {
            client,
            proxy: proxy.into(),
        })
    }

    /// Request URL for `feed_url`
    pub fn proxied_url(&self, feed_url: &str) -> String {
        if self.proxy.is_empty() {
            return feed_url.to_string();
        }
        let encoded: String = url::form_urlencoded::byte_serialize(feed_url.as_bytes()).collect();
        format!("{}{}", self.proxy, encoded)
    }
}

#[async_trait]
impl FeedFetcher for ProxyFetcher {
    async fn fetch(&self, url: &str) -> FeedResult<String> {
        let target = self.proxied_url(url);
        debug!(url, target = target.as_str(), "Fetching feed");

        let http_error = |err: reqwest::Error| FeedError::Http {
            url: url.to_string(),
            message: err.to_string(),
        };
        let response = self.client.get(&target).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_error)
    }
}

/// Canned responses keyed by feed URL; unknown URLs answer 404
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    responses: HashMap<String, Result<String, String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Err(message.into()));
        self
    }
}

#[async_trait]
impl FeedFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> FeedResult<String> {
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(FeedError::Http {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(FeedError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxied_url_encodes_target() {
        let fetcher = ProxyFetcher::new("https://proxy.example/raw?url=", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            fetcher.proxied_url("https://pubmed.example/rss?term=a&sort=date"),
            "https://proxy.example/raw?url=https%3A%2F%2Fpubmed.example%2Frss%3Fterm%3Da%26sort%3Ddate"
        );
    }

    #[test]
    fn test_empty_proxy_fetches_directly() {
        let fetcher = ProxyFetcher::new("", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(fetcher.proxied_url("https://a.example/feed"), "https://a.example/feed");
    }

    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new()
            .with_feed("https://ok.example", "<rss/>")
            .with_failure("https://down.example", "connection reset");

        assert_eq!(fetcher.fetch("https://ok.example").await.unwrap(), "<rss/>");
        assert!(matches!(
            fetcher.fetch("https://down.example").await,
            Err(FeedError::Http { .. })
        ));
        assert!(matches!(
            fetcher.fetch("https://missing.example").await,
            Err(FeedError::Status { status: 404, .. })
        ));
    }
}
