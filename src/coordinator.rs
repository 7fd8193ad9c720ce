//! Export coordinator - drives a chain traversal end to end
//!
//! This module contains the consumer side of the chain engine:
//! - Fetching the first post
//! - Pacing requests to stay below the remote rate limit
//! - Enforcing the post limit
//! - Writing markdown files, bundling and cleaning up

use crate::chain::{
    fetch_document, ChainError, ChainIterator, ChainObserver, ChainState, NextLinkPattern,
    TracingObserver,
};
use crate::config::Config;
use crate::fetch::DocumentFetcher;
use crate::output::{
    bundle_markdown, markdown_path, prepare_output_dir, remove_files, write_document_markdown,
    BundleFormat, BundleMetadata, OutputResult,
};
use crate::ConfigError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Outcome of an export run
#[derive(Debug)]
pub struct ExportSummary {
    /// Number of posts received from the chain
    pub posts: usize,

    /// Markdown files written, in chain order
    pub markdown_files: Vec<PathBuf>,

    /// Bundle written, if any
    pub bundle: Option<PathBuf>,

    /// Number of markdown files removed after bundling
    pub cleaned: usize,

    /// State of the chain when consumption stopped
    pub state: ChainState,

    /// Error that ended the chain early, if any
    pub failure: Option<ChainError>,
}

/// Main export coordinator structure
pub struct Coordinator<'a, F: DocumentFetcher + ?Sized> {
    config: &'a Config,
    fetcher: &'a F,
    pattern: NextLinkPattern,
    observer: Arc<dyn ChainObserver>,
}

impl<'a, F: DocumentFetcher + ?Sized> Coordinator<'a, F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `fetcher` - The fetch capability used for every post
    pub fn new(config: &'a Config, fetcher: &'a F) -> Result<Self, ConfigError> {
        let pattern = config.chain.pattern()?;

        Ok(Self {
            config,
            fetcher,
            pattern,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the observer handed to the chain iterator
    pub fn with_observer(mut self, observer: Arc<dyn ChainObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs the export
    ///
    /// A failure to fetch the first post aborts the run. Later fetch failures
    /// end the chain; the posts already written are still bundled. A post
    /// that cannot be written is logged and skipped.
    pub async fn run(&self, cancel: &CancellationToken) -> crate::Result<ExportSummary> {
        let output_dir = &self.config.output.dir;
        prepare_output_dir(output_dir)?;

        tracing::info!("Fetching first post: {}", self.config.chain.url);
        let first =
            fetch_document(self.fetcher, &self.pattern, &self.config.chain.url, cancel).await?;

        let metadata = BundleMetadata {
            title: first.title.clone(),
            author: first.author.clone(),
        };

        let mut chain = ChainIterator::new(first, self.fetcher, self.pattern.clone(), cancel.clone())
            .with_observer(self.observer.clone());

        let delay = self.config.chain.delay();
        let limit = self.config.chain.limit();

        let mut posts = 0;
        let mut markdown_files = Vec::new();
        let mut failure = None;

        loop {
            if chain.will_fetch() && !delay.is_zero() {
                pace(delay, cancel).await;
            }

            let Some(item) = chain.next().await else {
                break;
            };

            let document = match item {
                Ok(document) => document,
                Err(e) => {
                    tracing::error!("Error getting post, stopping early: {}", e);
                    failure = Some(e);
                    break;
                }
            };

            posts += 1;

            let path = markdown_path(output_dir, posts);
            match write_document_markdown(&document, &format!("Post {}", posts), &path) {
                Ok(()) => {
                    tracing::info!("Wrote post {} to {}", posts, path.display());
                    markdown_files.push(path);
                }
                Err(e) => {
                    tracing::error!("Error writing post {} to markdown, skipping: {}", posts, e);
                }
            }

            if let Some(limit) = limit {
                if posts >= limit {
                    tracing::info!("Reached limit of {} posts, stopping", limit);
                    break;
                }
            }
        }

        let cancelled = failure.as_ref().is_some_and(ChainError::is_cancelled);
        if cancelled {
            tracing::warn!("Export cancelled, skipping bundling and cleanup");
        }

        let bundle = if cancelled {
            None
        } else {
            self.bundle(&metadata, &markdown_files).await?
        };

        let cleaned = if self.config.output.clean && !cancelled {
            tracing::info!("Cleaning up markdown files...");
            remove_files(&markdown_files)
        } else {
            0
        };

        Ok(ExportSummary {
            posts,
            markdown_files,
            bundle,
            cleaned,
            state: chain.state(),
            failure,
        })
    }

    /// Bundles the written files if a supported bundle was requested
    async fn bundle(
        &self,
        metadata: &BundleMetadata,
        markdown_files: &[PathBuf],
    ) -> OutputResult<Option<PathBuf>> {
        let Some(name) = &self.config.output.bundle else {
            return Ok(None);
        };

        let target = self.config.output.dir.join(name);
        let Some(format) = BundleFormat::from_path(&target) else {
            tracing::warn!("Unsupported bundle format: {}, skipping bundling", name);
            return Ok(None);
        };

        if markdown_files.is_empty() {
            tracing::warn!("No markdown files were written, skipping bundling");
            return Ok(None);
        }

        tracing::info!("Bundling {} markdown files into {:?}...", markdown_files.len(), format);
        bundle_markdown(format, metadata, markdown_files, &target).await?;
        tracing::info!("Wrote bundle to {}", target.display());

        Ok(Some(target))
    }
}

/// Waits before the next request, returning early on cancellation
async fn pace(delay: Duration, cancel: &CancellationToken) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel.cancelled() => {}
    }
}
