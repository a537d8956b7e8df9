use std::time::Duration;

use jotimap_core::{parse_groups, ParsedGroup};
use reqwest::Client;
use serde_json::value::RawValue;
use serde_json::Value;

use crate::error::SubscriptionsError;
use crate::retry::retry_with_backoff;
use crate::source::{Endpoints, SubscriptionsSource};

/// Fetches the subscriptions feed, either verbatim or parsed.
///
/// Transient failures (network errors, 429/502/503/504) are retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct SubscriptionsClient {
    client: Client,
    endpoints: Endpoints,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl SubscriptionsClient {
    /// Creates a client for the default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, SubscriptionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints: Endpoints::default(),
            max_retries,
            backoff_base_secs,
        })
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches the feed for `source`, checks that it is JSON and returns the
    /// body text unchanged (key order and number formatting included).
    ///
    /// # Errors
    ///
    /// - [`SubscriptionsError::Http`]: network or TLS failure after all retries.
    /// - [`SubscriptionsError::UpstreamStatus`]: any non-2xx status.
    /// - [`SubscriptionsError::InvalidBody`]: the body is not JSON (not retried).
    pub async fn fetch_verbatim(
        &self,
        source: &SubscriptionsSource,
    ) -> Result<Box<RawValue>, SubscriptionsError> {
        let url = self.endpoints.url_for(source);
        tracing::debug!(%url, archive = source.is_archive(), "fetching subscriptions");

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SubscriptionsError::UpstreamStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Box<RawValue>>(&body)
                    .map_err(|source| SubscriptionsError::InvalidBody { url, source })
            }
        })
        .await
    }

    /// Fetches the feed for `source` and parses its body into a [`Value`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_verbatim`].
    pub async fn fetch_raw(&self, source: &SubscriptionsSource) -> Result<Value, SubscriptionsError> {
        let raw = self.fetch_verbatim(source).await?;
        serde_json::from_str(raw.get()).map_err(|e| SubscriptionsError::InvalidBody {
            url: self.endpoints.url_for(source),
            source: e,
        })
    }

    /// Fetches the feed and parses it into positioned groups.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_raw`].
    pub async fn fetch_groups(
        &self,
        source: &SubscriptionsSource,
    ) -> Result<Vec<ParsedGroup>, SubscriptionsError> {
        let body = self.fetch_raw(source).await?;
        Ok(parse_groups(&body))
    }
}
