//! Post documents flowing through the chain

use crate::chain::link::{extract_next_ref, NextLinkPattern};
use crate::chain::sanitize::sanitize;
use chrono::{DateTime, Utc};

/// A post as returned by a fetcher, before any processing
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Post title
    pub title: String,

    /// Unprocessed post body
    pub body: String,

    /// Address the post was fetched from
    pub source_ref: String,

    /// Post author
    pub author: String,

    /// Creation time of the post
    pub created_at: DateTime<Utc>,
}

/// A sanitized post, ready to be serialized
///
/// Built once from a [`RawDocument`]; the next-reference is taken from the
/// raw body before the body is cleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub body: String,
    pub source_ref: String,
    pub author: String,
    pub created_at: DateTime<Utc>,

    /// Address of the next post, `None` at the end of a chain
    pub next_ref: Option<String>,
}

impl Document {
    /// Extracts the next-reference and sanitizes the body of a raw post
    pub fn from_raw(raw: RawDocument, pattern: &NextLinkPattern) -> Self {
        let next_ref = extract_next_ref(pattern, &raw.body);
        let body = sanitize(pattern, &raw.body);

        Self {
            title: raw.title,
            body,
            source_ref: raw.source_ref,
            author: raw.author,
            created_at: raw.created_at,
            next_ref,
        }
    }

    /// Returns true if this is the last post of its chain
    pub fn is_terminal(&self) -> bool {
        self.next_ref.is_none()
    }
}
