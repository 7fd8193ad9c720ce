//! Fetch capability for posts
//!
//! The chain engine only knows about [`DocumentFetcher`]; everything about
//! talking to Reddit (authentication, HTTP, error classification) lives in
//! [`RedditClient`].

mod address;
mod reddit;

pub use address::post_id_from_permalink;
pub use reddit::{RedditClient, DEFAULT_API_BASE, DEFAULT_AUTH_BASE};

use crate::chain::RawDocument;
use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur while fetching a post
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Malformed post address: {0}")]
    MalformedAddress(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Rate limited by the server while requesting {url}")]
    RateLimited { url: String },

    #[error("Post not found: {id}")]
    NotFound { id: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Response for post {id} did not contain a post")]
    MissingPost { id: String },

    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Returns true if this error came from the cancellation signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Retrieves a raw post given its address
///
/// Implementations must watch `cancel` for the whole duration of the call and
/// return [`FetchError::Cancelled`] promptly once it fires.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, address: &str, cancel: &CancellationToken) -> FetchResult<RawDocument>;
}
