//! Reddit API client
//!
//! This module handles all HTTP requests to Reddit, including:
//! - Building the HTTP client with a descriptive user agent
//! - Application-only OAuth (client credentials grant) with token caching
//! - Fetching a single post by id
//! - Error classification (not found, rate limited, auth, other statuses)

use crate::chain::RawDocument;
use crate::config::RedditConfig;
use crate::fetch::{post_id_from_permalink, DocumentFetcher, FetchError, FetchResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Base URL for OAuth token requests
pub const DEFAULT_AUTH_BASE: &str = "https://www.reddit.com";

/// Base URL for authenticated API requests
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";

/// Tokens are refreshed this long before they actually expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    created_utc: f64,
}

#[derive(Debug)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Fetches posts from Reddit using application-only OAuth
pub struct RedditClient {
    http: Client,
    client_id: String,
    client_secret: String,
    auth_base: String,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

impl RedditClient {
    /// Creates a client from the Reddit section of the configuration
    ///
    /// No request is made here; the first fetch obtains an access token.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reddit2md::config::RedditConfig;
    /// use reddit2md::fetch::RedditClient;
    ///
    /// let config = RedditConfig {
    ///     client_id: "id".to_string(),
    ///     client_secret: "secret".to_string(),
    ///     ..RedditConfig::default()
    /// };
    ///
    /// let client = RedditClient::new(&config).unwrap();
    /// ```
    pub fn new(config: &RedditConfig) -> FetchResult<Self> {
        let http = build_http_client(&config.user_agent()).map_err(|source| FetchError::Http {
            url: config.api_base.clone(),
            source,
        })?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_base: config.auth_base.trim_end_matches('/').to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Returns a valid access token, requesting a new one when needed
    async fn access_token(&self) -> FetchResult<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let url = format!("{}/api/v1/access_token", self.auth_base);
        tracing::debug!("Requesting access token from {}", url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited { url });
        }
        if !status.is_success() {
            return Err(FetchError::Auth(format!(
                "token request returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = decode_json(response, &url).await?;
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);

        *cached = Some(AccessToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(body.access_token)
    }

    /// Fetches a post by id
    ///
    /// # Response Handling
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 404 | NotFound |
    /// | HTTP 429 | RateLimited |
    /// | HTTP 401 | Auth (cached token dropped) |
    /// | HTTP 403 | Auth |
    /// | Other non-2xx | Status |
    /// | Empty listing | MissingPost |
    async fn get_post(&self, id: &str, source_ref: &str) -> FetchResult<RawDocument> {
        let token = self.access_token().await?;
        let url = format!("{}/comments/{}", self.api_base, id);

        tracing::debug!("Fetching post {} from {}", id, url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { id: id.to_string() });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited { url });
        }

        if status == StatusCode::UNAUTHORIZED {
            self.token.lock().await.take();
            return Err(FetchError::Auth(format!("access token rejected for {}", url)));
        }

        if status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth(format!("access denied for {}", url)));
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        // Post listing first, comment listing second
        let listings: Vec<serde_json::Value> = decode_json(response, &url).await?;
        let post_listing = listings
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::MissingPost { id: id.to_string() })?;

        let listing: Listing =
            serde_json::from_value(post_listing).map_err(|e| FetchError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let post = listing
            .data
            .children
            .into_iter()
            .next()
            .map(|thing| thing.data)
            .ok_or_else(|| FetchError::MissingPost { id: id.to_string() })?;

        Ok(RawDocument {
            title: post.title,
            body: post.selftext,
            source_ref: source_ref.to_string(),
            author: post.author,
            created_at: timestamp_to_utc(post.created_utc),
        })
    }
}

#[async_trait]
impl DocumentFetcher for RedditClient {
    async fn fetch(&self, address: &str, cancel: &CancellationToken) -> FetchResult<RawDocument> {
        let id = post_id_from_permalink(address)?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.get_post(&id, address) => result,
        }
    }
}

/// Builds an HTTP client identifying itself with the given user agent
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    response: Response,
    url: &str,
) -> FetchResult<T> {
    response.json::<T>().await.map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn timestamp_to_utc(created_utc: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(created_utc as i64, 0).unwrap_or_default()
}
