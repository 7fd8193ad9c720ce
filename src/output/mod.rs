//! Output module for exported posts
//!
//! This module handles:
//! - Preparing the output directory
//! - Writing one markdown file per post
//! - Bundling the markdown files into an EPUB
//! - Removing the markdown files afterwards

mod bundle;
mod markdown;

pub use bundle::{bundle_markdown, BundleFormat, BundleMetadata};
pub use markdown::{format_document_markdown, markdown_path, write_document_markdown};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to bundle: {0}")]
    Bundle(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Creates the output directory if it doesn't exist
pub fn prepare_output_dir(dir: &Path) -> OutputResult<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Removes the given files, logging and skipping failures
///
/// # Returns
///
/// The number of files actually removed
pub fn remove_files(paths: &[PathBuf]) -> usize {
    let mut removed = 0;

    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::error!("Error removing {}, skipping: {}", path.display(), e);
            }
        }
    }

    removed
}
