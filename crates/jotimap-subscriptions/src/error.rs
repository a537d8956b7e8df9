use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubscriptionsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("response from {url} is not valid JSON: {source}")]
    InvalidBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid archive timestamp \"{0}\": expected 1-14 digits")]
    InvalidTimestamp(String),
}

impl SubscriptionsError {
    /// `true` when the upstream answered but with something unusable, as
    /// opposed to never answering at all.
    #[must_use]
    pub fn is_bad_gateway(&self) -> bool {
        matches!(
            self,
            SubscriptionsError::UpstreamStatus { .. } | SubscriptionsError::InvalidBody { .. }
        )
    }
}
