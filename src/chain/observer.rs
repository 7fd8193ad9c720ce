//! Traversal observers
//!
//! The iterator reports what it does through an injected observer rather
//! than a process-wide logger, so it can be exercised silently in tests or
//! wired to progress reporting.

use crate::chain::Document;
use crate::fetch::FetchError;

/// Receives traversal events from a [`ChainIterator`](crate::chain::ChainIterator)
///
/// Every method has an empty default body. `position` is 1-based.
pub trait ChainObserver: Send + Sync {
    /// About to fetch the post at `position`
    fn fetching(&self, _position: usize, _address: &str) {}

    /// Handed a post to the consumer
    fn yielded(&self, _position: usize, _document: &Document) {}

    /// A fetch failed and traversal stopped
    fn failed(&self, _address: &str, _error: &FetchError) {}

    /// The last post of the chain was yielded
    fn exhausted(&self, _count: usize) {}
}

/// Logs traversal events with `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ChainObserver for TracingObserver {
    fn fetching(&self, position: usize, address: &str) {
        tracing::debug!(position, address, "Fetching next post");
    }

    fn yielded(&self, position: usize, document: &Document) {
        tracing::info!("Got post {}: {}", position, document.title);
    }

    fn failed(&self, address: &str, error: &FetchError) {
        if error.is_cancelled() {
            tracing::warn!("Fetch of {} cancelled", address);
        } else {
            tracing::error!(address, error = %error, "Failed to fetch post, chain stops here");
        }
    }

    fn exhausted(&self, count: usize) {
        tracing::info!("No next link found, chain ended after {} posts", count);
    }
}

/// Ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ChainObserver for NoopObserver {}
