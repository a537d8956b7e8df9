//! Which copy of the subscriptions feed to read, and where it lives.

use jotimap_core::config::{is_wayback_timestamp, DEFAULT_ARCHIVE_BASE_URL, DEFAULT_UPSTREAM_URL};

use crate::error::SubscriptionsError;

pub use jotimap_core::config::DEFAULT_ARCHIVE_TIMESTAMP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionsSource {
    Live,
    /// Wayback Machine snapshot at `timestamp` (`YYYYMMDDhhmmss`, possibly truncated).
    Archive { timestamp: String },
}

impl SubscriptionsSource {
    /// Resolve the `archive` / `ts` query parameters.
    ///
    /// `archive` selects the snapshot when it is `"1"` or `"true"`; `ts` is
    /// only consulted then and falls back to `default_ts` when absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionsError::InvalidTimestamp`] when the chosen
    /// timestamp is not 1-14 ASCII digits.
    pub fn from_query(
        archive: Option<&str>,
        ts: Option<&str>,
        default_ts: &str,
    ) -> Result<Self, SubscriptionsError> {
        if !matches!(archive, Some("1" | "true")) {
            return Ok(Self::Live);
        }

        let timestamp = ts
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default_ts);
        if !is_wayback_timestamp(timestamp) {
            return Err(SubscriptionsError::InvalidTimestamp(timestamp.to_owned()));
        }

        Ok(Self::Archive {
            timestamp: timestamp.to_owned(),
        })
    }

    #[must_use]
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub live_url: String,
    pub archive_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            live_url: DEFAULT_UPSTREAM_URL.to_owned(),
            archive_base_url: DEFAULT_ARCHIVE_BASE_URL.to_owned(),
        }
    }
}

impl Endpoints {
    /// URL to request for `source`. Archive URLs use the `id_` flag so the
    /// Wayback Machine serves the captured body without its toolbar.
    #[must_use]
    pub fn url_for(&self, source: &SubscriptionsSource) -> String {
        match source {
            SubscriptionsSource::Live => self.live_url.clone(),
            SubscriptionsSource::Archive { timestamp } => format!(
                "{}/web/{timestamp}id_/{}",
                self.archive_base_url.trim_end_matches('/'),
                self.live_url
            ),
        }
    }
}
