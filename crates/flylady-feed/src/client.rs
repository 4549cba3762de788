//! HTTP client for the upstream shop export.

use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;

/// Fetches the XML export from the configured feed URL.
///
/// One request per call, no retries and no fallback: a non-success status or
/// a network failure fails the whole ingestion. Freshness is the caller's
/// concern (the server keeps a TTL cache).
pub struct FeedClient {
    client: Client,
    feed_url: String,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        feed_url: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    /// Fetches the raw XML document.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Unavailable`]: any non-2xx status.
    /// - [`FeedError::Http`]: network or TLS failure.
    pub async fn fetch_feed(&self) -> Result<String, FeedError> {
        tracing::debug!(url = %self.feed_url, "fetching product feed");
        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Unavailable {
                status: status.as_u16(),
                url: self.feed_url.clone(),
            });
        }

        Ok(response.text().await?)
    }

    #[must_use]
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}
