//! Page fetching over HTTP.
//!
//! A [`Fetcher`] owns a single `reqwest::Client` for the whole run, so every
//! request shares one connection pool. Dropping the fetcher closes the pool,
//! whichever way the run ends.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use url::Url;

use crate::{Result, SerialbookError};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Chapter request timeout in seconds.
    pub timeout: u64,
    /// Listing request timeout in seconds.
    pub listing_timeout: u64,
    /// Client identity sent as the User-Agent header.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 20,
            listing_timeout: 5,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Chrome/119.0.0.0".to_string(),
        }
    }
}

/// Sequential page fetcher backed by one pooled client.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(SerialbookError::HttpError)?;

        Ok(Self { client, config })
    }

    /// Fetches the novel's listing page.
    pub async fn fetch_listing(&self, url: &str) -> Result<String> {
        self.get(url, self.config.listing_timeout).await
    }

    /// Fetches one chapter page.
    pub async fn fetch_chapter(&self, url: &str) -> Result<String> {
        self.get(url, self.config.timeout).await
    }

    async fn get(&self, url: &str, timeout: u64) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| SerialbookError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .client
            .get(parsed_url)
            .timeout(Duration::from_secs(timeout))
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SerialbookError::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
            && !is_html(content_type)
        {
            return Err(SerialbookError::NotHtml { url: url.to_string(), content_type: content_type.to_string() });
        }

        response.text().await.map_err(|e| classify(e, timeout))
    }
}

fn classify(err: reqwest::Error, timeout: u64) -> SerialbookError {
    if err.is_timeout() { SerialbookError::Timeout { timeout } } else { SerialbookError::HttpError(err) }
}

fn is_html(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 20);
        assert_eq!(config.listing_timeout, 5);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_html_content_types() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("application/json"));
        assert!(!is_html("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = Fetcher::new(FetchConfig::default()).unwrap();
        let result = fetcher.fetch_chapter("not-a-url").await;

        assert!(matches!(result, Err(SerialbookError::InvalidUrl(_))));
    }
}
