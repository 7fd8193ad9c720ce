//! reddit2md: pack a chain of Reddit posts into markdown and EPUB
//!
//! Serial stories on Reddit are often split over many posts, each ending with
//! a `[Next](...)` link to the following part. This crate follows those links
//! from a starting post, cleans up each post body and writes the posts out as
//! markdown files, optionally bundled into a single EPUB.

pub mod chain;
pub mod config;
pub mod coordinator;
pub mod fetch;
pub mod output;

use thiserror::Error;

/// Main error type for reddit2md operations
#[derive(Debug, Error)]
pub enum Reddit2MdError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid next link pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for reddit2md operations
pub type Result<T> = std::result::Result<T, Reddit2MdError>;

// Re-export commonly used types
pub use chain::{ChainIterator, ChainState, Document, NextLinkPattern};
pub use config::Config;
pub use coordinator::{Coordinator, ExportSummary};
pub use fetch::{DocumentFetcher, RedditClient};
