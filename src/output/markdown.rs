//! Markdown serialization of posts
//!
//! Every post becomes its own file with a numbered heading, the post title,
//! its author and the sanitized body.

use crate::chain::Document;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the markdown file for the post at `number` (1-based)
pub fn markdown_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("post_{:02}.md", number))
}

/// Writes a post to a markdown file
///
/// # Arguments
///
/// * `document` - The post to write
/// * `heading` - Top-level heading, e.g. `Post 3`
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_document_markdown(
    document: &Document,
    heading: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_document_markdown(document, heading);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a post as markdown
pub fn format_document_markdown(document: &Document, heading: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", heading));
    md.push_str(&format!("## {}\n\n", document.title));
    md.push_str(&format!("**Post author:** {}  \n", document.author));
    md.push_str(&format!(
        "**Posted:** {}\n\n",
        document.created_at.format("%Y-%m-%d")
    ));

    if !document.body.is_empty() {
        md.push_str(&document.body);
        md.push('\n');
    }

    md
}
