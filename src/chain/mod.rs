//! Chain traversal engine
//!
//! This module contains the core of the exporter:
//! - Continuation link detection
//! - Post body sanitization
//! - The lazy, cancellable iterator that follows a chain of posts

mod document;
mod iterator;
mod link;
mod observer;
mod sanitize;

#[cfg(test)]
pub(crate) mod testing;

pub use document::{Document, RawDocument};
pub use iterator::{fetch_document, ChainIterator, ChainState};
pub use link::{extract_next_ref, NextLinkPattern, DEFAULT_DOMAIN, DEFAULT_LABEL};
pub use observer::{ChainObserver, NoopObserver, TracingObserver};
pub use sanitize::sanitize;

use crate::fetch::FetchError;
use thiserror::Error;

/// Terminal error of a chain traversal
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Failed to fetch {address}: {source}")]
    Fetch { address: String, source: FetchError },
}

impl ChainError {
    /// Returns true if traversal stopped because of cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Fetch { source, .. } => source.is_cancelled(),
        }
    }
}
