//! Next-link detection
//!
//! A post continues a series when its body contains a markdown link whose
//! label reads "Next" (any case) and whose target points back at the hosting
//! site, e.g. `[Next](https://www.reddit.com/r/SomeSub/comments/abcdef/some_post/)`.

use regex::Regex;

/// Default label of a continuation link
pub const DEFAULT_LABEL: &str = "Next";

/// Default marker that a continuation target must contain
pub const DEFAULT_DOMAIN: &str = "reddit.com";

/// Compiled pattern for continuation links
///
/// The pattern is built once and handed to whoever needs it (extraction,
/// sanitization, the chain iterator) instead of living in a global.
#[derive(Debug, Clone)]
pub struct NextLinkPattern {
    regex: Regex,
}

impl NextLinkPattern {
    /// Builds a pattern for `[label](...domain...)` links
    ///
    /// The label is matched case-insensitively. Both parts are escaped, so
    /// `reddit.com` matches a literal dot.
    ///
    /// # Example
    ///
    /// ```
    /// use reddit2md::chain::NextLinkPattern;
    ///
    /// let pattern = NextLinkPattern::new("Next", "example.com").unwrap();
    /// assert!(pattern.is_next_link("[next](https://example.com/a/)"));
    /// ```
    pub fn new(label: &str, domain: &str) -> Result<Self, regex::Error> {
        let source = format!(
            r"\[(?i:{})\]\((.*?{}.*?)\)",
            regex::escape(label),
            regex::escape(domain)
        );

        Ok(Self {
            regex: Regex::new(&source)?,
        })
    }

    /// Returns true if the text contains a continuation link anywhere
    pub fn is_next_link(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the target of the first continuation link, if any
    pub fn extract(&self, text: &str) -> Option<String> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for NextLinkPattern {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL, DEFAULT_DOMAIN).expect("default next-link pattern compiles")
    }
}

/// Extracts the next-reference from a post body
///
/// Returns `None` when the body has no continuation link. Only the first
/// match is considered.
pub fn extract_next_ref(pattern: &NextLinkPattern, body: &str) -> Option<String> {
    pattern.extract(body)
}
