//! Integration tests for chain exports
//!
//! These tests use wiremock to stand in for the Reddit API and run the
//! full export cycle end-to-end: token request, chain traversal and
//! markdown output.

use reddit2md::chain::{ChainError, NoopObserver};
use reddit2md::config::{validate, Config};
use reddit2md::fetch::FetchError;
use reddit2md::{ChainState, Coordinator, RedditClient};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn permalink(id: &str) -> String {
    format!("https://www.reddit.com/r/Serial/comments/{}/a_part/", id)
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, start: &str, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.reddit.client_id = "test-id".to_string();
    config.reddit.client_secret = "test-secret".to_string();
    config.reddit.auth_base = server.uri();
    config.reddit.api_base = server.uri();
    config.chain.url = start.to_string();
    config.chain.delay_secs = 0;
    config.output.dir = output_dir.to_path_buf();
    config
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "integration-token",
            "token_type": "bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a post whose body links to `next`, if given
async fn mount_post(server: &MockServer, id: &str, title: &str, next: Option<&str>) {
    let mut body = format!("This is {}.\n\n&amp;#x200B;\n", title);
    if let Some(next) = next {
        body.push_str(&format!("[Next]({})\n", permalink(next)));
    }

    let listing = json!([
        {
            "kind": "Listing",
            "data": {
                "children": [{
                    "kind": "t3",
                    "data": {
                        "title": title,
                        "selftext": body,
                        "author": "serial_writer",
                        "created_utc": 1_700_000_000.0
                    }
                }]
            }
        },
        { "kind": "Listing", "data": { "children": [] } }
    ]);

    Mock::given(method("GET"))
        .and(path(format!("/comments/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .mount(server)
        .await;
}

async fn run_export(config: &Config) -> reddit2md::Result<reddit2md::ExportSummary> {
    validate(config).expect("test config should be valid");

    let client = RedditClient::new(&config.reddit)?;
    Coordinator::new(config, &client)?
        .with_observer(Arc::new(NoopObserver))
        .run(&CancellationToken::new())
        .await
}

#[tokio::test]
async fn test_full_chain_export() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_post(&server, "aaa111", "Part One", Some("bbb222")).await;
    mount_post(&server, "bbb222", "Part Two", Some("ccc333")).await;
    mount_post(&server, "ccc333", "Part Three", None).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, &permalink("aaa111"), dir.path());

    let summary = run_export(&config).await.unwrap();

    assert_eq!(summary.posts, 3);
    assert_eq!(summary.state, ChainState::Exhausted);
    assert!(summary.failure.is_none());
    assert!(summary.bundle.is_none());

    let first = std::fs::read_to_string(dir.path().join("post_01.md")).unwrap();
    assert!(first.starts_with("# Post 1\n\n## Part One\n"));
    assert!(first.contains("**Post author:** serial_writer"));
    assert!(first.contains("**Posted:** 2023-11-14"));
    assert!(first.contains("This is Part One."));
    assert!(!first.contains("[Next]"));
    assert!(!first.contains("&amp;#x200B;"));

    let third = std::fs::read_to_string(dir.path().join("post_03.md")).unwrap();
    assert!(third.contains("## Part Three"));
    assert!(!dir.path().join("post_04.md").exists());
}

#[tokio::test]
async fn test_missing_post_ends_chain() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_post(&server, "aaa111", "Part One", Some("bbb222")).await;

    Mock::given(method("GET"))
        .and(path("/comments/bbb222"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, &permalink("aaa111"), dir.path());

    let summary = run_export(&config).await.unwrap();

    assert_eq!(summary.posts, 1);
    assert_eq!(summary.state, ChainState::Failed);
    assert!(dir.path().join("post_01.md").exists());
    assert!(!dir.path().join("post_02.md").exists());

    match summary.failure {
        Some(ChainError::Fetch { address, source }) => {
            assert_eq!(address, permalink("bbb222"));
            assert!(matches!(source, FetchError::NotFound { ref id } if id == "bbb222"));
        }
        other => panic!("unexpected failure: {:?}", other),
    }
}

#[tokio::test]
async fn test_limit_skips_remaining_posts() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_post(&server, "aaa111", "Part One", Some("bbb222")).await;
    mount_post(&server, "bbb222", "Part Two", Some("ccc333")).await;

    // Must never be requested
    Mock::given(method("GET"))
        .and(path("/comments/ccc333"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = create_test_config(&server, &permalink("aaa111"), dir.path());
    config.chain.limit = 2;

    let summary = run_export(&config).await.unwrap();

    assert_eq!(summary.posts, 2);
    assert_eq!(summary.state, ChainState::Active);
    assert_eq!(summary.markdown_files.len(), 2);
}

#[tokio::test]
async fn test_malformed_start_url_aborts() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server, "https://www.reddit.com/r/Serial/", dir.path());

    let result = run_export(&config).await;

    assert!(matches!(
        result,
        Err(reddit2md::Reddit2MdError::Fetch(FetchError::MalformedAddress(_)))
    ));
    assert!(!dir.path().join("post_01.md").exists());
}
