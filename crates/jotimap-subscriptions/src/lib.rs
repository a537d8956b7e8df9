//! HTTP client for the Jotihunt subscriptions feed, live or from a Wayback
//! Machine snapshot.

pub mod client;
pub mod error;
mod retry;
pub mod source;

pub use client::SubscriptionsClient;
pub use error::SubscriptionsError;
pub use source::{Endpoints, SubscriptionsSource, DEFAULT_ARCHIVE_TIMESTAMP};
