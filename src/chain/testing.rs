//! In-memory fetcher for unit tests

use crate::chain::RawDocument;
use crate::fetch::{DocumentFetcher, FetchError, FetchResult};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

pub fn permalink(part: usize) -> String {
    format!(
        "https://www.reddit.com/r/Serial/comments/p{}/part_{}/",
        part, part
    )
}

/// Serves a fixed set of posts and counts fetch calls
pub struct MemoryFetcher {
    posts: HashMap<String, RawDocument>,
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
}

impl MemoryFetcher {
    /// Chain of `len` posts where part k links to part k + 1
    pub fn chain(len: usize) -> Self {
        let posts = (1..=len)
            .map(|part| {
                let mut body = format!("Text of part {}.\n\n&amp;#x200B;\n", part);
                if part < len {
                    body.push_str(&format!("[Next]({})\n", permalink(part + 1)));
                }

                let raw = RawDocument {
                    title: format!("Part {}", part),
                    body,
                    source_ref: permalink(part),
                    author: "serial_writer".to_string(),
                    created_at: Utc
                        .with_ymd_and_hms(2024, 1, part as u32, 9, 0, 0)
                        .unwrap(),
                };
                (permalink(part), raw)
            })
            .collect();

        Self {
            posts,
            calls: AtomicUsize::new(0),
            fail_on_call: None,
        }
    }

    /// Makes the n-th fetch call (1-based) fail with a server error
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Removes a part so that the link pointing at it is broken
    pub fn without(mut self, part: usize) -> Self {
        self.posts.remove(&permalink(part));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentFetcher for MemoryFetcher {
    async fn fetch(&self, address: &str, cancel: &CancellationToken) -> FetchResult<RawDocument> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        if self.fail_on_call == Some(call) {
            return Err(FetchError::Status {
                url: address.to_string(),
                status: 500,
            });
        }

        self.posts
            .get(address)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                id: address.to_string(),
            })
    }
}
