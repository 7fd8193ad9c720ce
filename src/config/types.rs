use crate::chain::{NextLinkPattern, DEFAULT_DOMAIN, DEFAULT_LABEL};
use crate::fetch::{DEFAULT_API_BASE, DEFAULT_AUTH_BASE};
use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for reddit2md
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reddit: RedditConfig,
    pub chain: ChainConfig,
    pub output: OutputConfig,
}

/// Reddit API access
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RedditConfig {
    /// OAuth client id of a Reddit "script" or "web" app
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// User agent sent with every request
    pub user_agent: Option<String>,

    /// Base URL for token requests
    pub auth_base: String,

    /// Base URL for API requests
    pub api_base: String,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: None,
            auth_base: DEFAULT_AUTH_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl RedditConfig {
    /// Configured user agent, or `reddit2md/<version>`
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "{}/{} (chain exporter)",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )
        })
    }
}

/// Chain traversal behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChainConfig {
    /// Permalink of the first post
    pub url: String,

    /// Delay before each request after the first (seconds)
    pub delay_secs: u64,

    /// Maximum number of posts to follow, 0 for no limit
    pub limit: usize,

    /// Label of continuation links
    pub next_label: String,

    /// Marker a continuation link target must contain
    pub link_domain: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            delay_secs: 2,
            limit: 0,
            next_label: DEFAULT_LABEL.to_string(),
            link_domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl ChainConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Post limit, `None` when unlimited
    pub fn limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }

    /// Builds the continuation link pattern
    pub fn pattern(&self) -> Result<NextLinkPattern, ConfigError> {
        NextLinkPattern::new(&self.next_label, &self.link_domain)
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory for markdown files and bundles (created if missing)
    pub dir: PathBuf,

    /// Bundle file name inside `dir`, e.g. `book.epub`
    pub bundle: Option<String>,

    /// Remove markdown files after bundling
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./reddit2md/"),
            bundle: None,
            clean: false,
        }
    }
}
