//! Bundling markdown files into a single book
//!
//! Conversion is delegated to the `pandoc` command-line tool, which must be
//! installed and on `PATH`.

use crate::output::{OutputError, OutputResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Supported bundle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Epub,
}

impl BundleFormat {
    /// Picks the format from the file extension, if supported
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "epub" => Some(Self::Epub),
            _ => None,
        }
    }

    fn pandoc_writer(&self) -> &'static str {
        match self {
            Self::Epub => "epub",
        }
    }
}

/// Book metadata, taken from the first post of the chain
#[derive(Debug, Clone)]
pub struct BundleMetadata {
    pub title: String,
    pub author: String,
}

/// Bundles markdown files into `output` with pandoc
///
/// # Arguments
///
/// * `format` - Target format
/// * `metadata` - Title and author of the book
/// * `inputs` - Markdown files, in chain order
/// * `output` - Path of the bundle to write
pub async fn bundle_markdown(
    format: BundleFormat,
    metadata: &BundleMetadata,
    inputs: &[PathBuf],
    output: &Path,
) -> OutputResult<()> {
    if inputs.is_empty() {
        return Err(OutputError::Bundle("no markdown files to bundle".to_string()));
    }

    let args = pandoc_args(format, metadata, inputs, output);
    tracing::debug!("Running pandoc with {} input files", inputs.len());

    let result = Command::new("pandoc").args(&args).output().await;
    let out = match result {
        Ok(out) => out,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(OutputError::Bundle(
                "pandoc is required for bundling but was not found on PATH".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if !out.status.success() {
        return Err(OutputError::Bundle(format!(
            "pandoc exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    Ok(())
}

/// Builds the pandoc command line
fn pandoc_args(
    format: BundleFormat,
    metadata: &BundleMetadata,
    inputs: &[PathBuf],
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--from".into(),
        "markdown".into(),
        "--to".into(),
        format.pandoc_writer().into(),
        "--metadata".into(),
        format!("title={}", metadata.title).into(),
        "--metadata".into(),
        format!("author={}", metadata.author).into(),
        "--output".into(),
        output.as_os_str().to_owned(),
    ];

    args.extend(inputs.iter().map(|p| p.as_os_str().to_owned()));
    args
}
