//! Lazy traversal of a post chain
//!
//! Each post names its successor only in its own body, so traversal is
//! strictly sequential: a post can only be fetched once the previous one has
//! been read. [`ChainIterator`] is pull-based; every call to
//! [`ChainIterator::next`] either returns an already fetched post or performs
//! exactly one fetch.
//!
//! # Pacing
//!
//! The iterator never sleeps. Consumers that want to stay below the remote
//! rate limit wait between pulls, and only need to do so when
//! [`ChainIterator::will_fetch`] is true. The first pull never fetches.

use crate::chain::link::NextLinkPattern;
use crate::chain::observer::{ChainObserver, TracingObserver};
use crate::chain::{ChainError, Document};
use crate::fetch::{DocumentFetcher, FetchError, FetchResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Traversal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainState {
    /// More posts may follow
    Active,

    /// The last yielded post had no next link
    Exhausted,

    /// The most recent fetch failed (including cancellation)
    Failed,
}

impl ChainState {
    /// Returns true if no more items will be produced
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Fetches a post and turns it into a sanitized [`Document`]
///
/// # Arguments
///
/// * `fetcher` - The fetch capability
/// * `pattern` - Continuation link pattern used for extraction and cleanup
/// * `address` - Address of the post
/// * `cancel` - Cancellation signal passed through to the fetcher
pub async fn fetch_document<F>(
    fetcher: &F,
    pattern: &NextLinkPattern,
    address: &str,
    cancel: &CancellationToken,
) -> FetchResult<Document>
where
    F: DocumentFetcher + ?Sized,
{
    let raw = fetcher.fetch(address, cancel).await?;
    Ok(Document::from_raw(raw, pattern))
}

/// Walks a chain of posts starting from an already fetched one
///
/// Items are `Ok(Document)` in chain order, optionally followed by a single
/// `Err` when a fetch fails. After that, or after the last post, `next`
/// returns `None`. An instance is consumed once; it cannot be restarted.
pub struct ChainIterator<'a, F: DocumentFetcher + ?Sized> {
    fetcher: &'a F,
    pattern: NextLinkPattern,
    cancel: CancellationToken,
    observer: Arc<dyn ChainObserver>,

    /// Post to hand out on the next pull without fetching
    pending: Option<Document>,

    /// Address to fetch on the next pull
    next_ref: Option<String>,

    state: ChainState,
    yielded: usize,
}

impl<'a, F: DocumentFetcher + ?Sized> ChainIterator<'a, F> {
    /// Creates an iterator whose first item is `first`
    ///
    /// `first` must already be sanitized (see [`fetch_document`]). Events are
    /// logged through [`TracingObserver`] unless replaced with
    /// [`with_observer`](Self::with_observer).
    pub fn new(
        first: Document,
        fetcher: &'a F,
        pattern: NextLinkPattern,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            pattern,
            cancel,
            observer: Arc::new(TracingObserver),
            pending: Some(first),
            next_ref: None,
            state: ChainState::Active,
            yielded: 0,
        }
    }

    /// Replaces the observer
    pub fn with_observer(mut self, observer: Arc<dyn ChainObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Current traversal state
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Number of posts handed out so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Returns true if the next call to [`next`](Self::next) will fetch
    pub fn will_fetch(&self) -> bool {
        self.state == ChainState::Active && self.pending.is_none() && self.next_ref.is_some()
    }

    /// Produces the next item of the chain
    ///
    /// Returns `None` once the chain is exhausted or has failed.
    pub async fn next(&mut self) -> Option<Result<Document, ChainError>> {
        if self.state.is_terminal() {
            return None;
        }

        let document = match self.pending.take() {
            Some(document) => document,
            None => {
                let Some(address) = self.next_ref.take() else {
                    self.state = ChainState::Exhausted;
                    return None;
                };

                match self.fetch_next(&address).await {
                    Ok(document) => document,
                    Err(source) => {
                        self.state = ChainState::Failed;
                        self.observer.failed(&address, &source);
                        return Some(Err(ChainError::Fetch { address, source }));
                    }
                }
            }
        };

        Some(Ok(self.emit(document)))
    }

    async fn fetch_next(&self, address: &str) -> FetchResult<Document> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        self.observer.fetching(self.yielded + 1, address);
        fetch_document(self.fetcher, &self.pattern, address, &self.cancel).await
    }

    fn emit(&mut self, document: Document) -> Document {
        self.yielded += 1;
        self.observer.yielded(self.yielded, &document);

        match &document.next_ref {
            Some(next) => self.next_ref = Some(next.clone()),
            None => {
                self.state = ChainState::Exhausted;
                self.observer.exhausted(self.yielded);
            }
        }

        document
    }
}
