//! Page Fetching
//!
//! Retrieves a web page over HTTP and stores its body in a [`Cache`] under the
//! page's URL with the cache's default TTL.

use std::time::Duration;

use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::cache::{Cache, Ttl};
use crate::error::{CacheError, Result};

/// Request timeout applied to every fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client that fills a cache with page bodies.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Builds a fetcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `page` and stores its body in `cache` with `Ttl::Default`.
    ///
    /// Returns the key the body was stored under (the normalised URL). On
    /// any failure the cache is left untouched.
    pub async fn retrieve_page<V>(&self, cache: &Cache<V>, page: &str) -> Result<String>
    where
        V: From<Vec<u8>>,
    {
        let url = parse_page_url(page)?;
        let key = url.to_string();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(page, error = %e, "page request failed");
            CacheError::Fetch(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(page, %status, "page request returned an error status");
            return Err(CacheError::Fetch(format!("{} returned {}", key, status)));
        }

        let body = response.bytes().await?.to_vec();
        info!(key = %key, bytes = body.len(), "page retrieved");

        cache.set(key.clone(), V::from(body), Ttl::Default);
        Ok(key)
    }
}

/// Accepts only absolute http(s) URLs.
pub fn parse_page_url(page: &str) -> Result<Url> {
    let url = Url::parse(page.trim()).map_err(|e| CacheError::InvalidUrl(format!("{}: {}", page, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CacheError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            page, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_page_url_normalises() {
        let url = parse_page_url("https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_page_url_rejects_relative() {
        assert!(matches!(
            parse_page_url("/just/a/path"),
            Err(CacheError::InvalidUrl(_))
        ));
        assert!(matches!(parse_page_url("not a url"), Err(CacheError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_page_url_rejects_other_schemes() {
        assert!(matches!(
            parse_page_url("ftp://example.com/file"),
            Err(CacheError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_leaves_cache_untouched() {
        let cache: Cache<Vec<u8>> = Cache::new(&Config::default());
        let fetcher = PageFetcher::new().unwrap();

        let result = fetcher.retrieve_page(&cache, "nonsense").await;

        assert!(matches!(result, Err(CacheError::InvalidUrl(_))));
        assert!(cache.is_empty());
    }
}
