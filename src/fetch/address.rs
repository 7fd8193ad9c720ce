use crate::fetch::FetchError;
use url::Url;

/// Extracts the post id from a Reddit permalink
///
/// The id is the third-from-last segment of a permalink path, e.g. `abc123`
/// in `https://www.reddit.com/r/Sub/comments/abc123/some_title/`.
///
/// Accepts absolute URLs and bare `/r/...` paths. Query strings and
/// fragments are ignored and a missing trailing slash is tolerated.
///
/// # Errors
///
/// [`FetchError::MalformedAddress`] if the path is too short, the segment
/// before the id is not `comments`, or the id is not plain alphanumeric.
pub fn post_id_from_permalink(permalink: &str) -> Result<String, FetchError> {
    let trimmed = permalink.trim();

    let path = match Url::parse(trimmed) {
        Ok(url) => url.path().to_string(),
        Err(_) if trimmed.starts_with('/') => trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        Err(e) => {
            return Err(FetchError::MalformedAddress(format!(
                "{} ({})",
                permalink, e
            )))
        }
    };

    let path = if path.ends_with('/') {
        path
    } else {
        format!("{}/", path)
    };

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 4 || segments[segments.len() - 4] != "comments" {
        return Err(FetchError::MalformedAddress(permalink.to_string()));
    }

    let id = segments[segments.len() - 3];
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FetchError::MalformedAddress(permalink.to_string()));
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_permalink() {
        let id =
            post_id_from_permalink("https://www.reddit.com/r/Sub/comments/abc123/some_title/")
                .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_permalink_without_trailing_slash() {
        let id =
            post_id_from_permalink("https://www.reddit.com/r/Sub/comments/abc123/some_title")
                .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_permalink_with_query() {
        let id = post_id_from_permalink(
            "https://old.reddit.com/r/Sub/comments/xyz9/title/?utm_source=share#top",
        )
        .unwrap();
        assert_eq!(id, "xyz9");
    }

    #[test]
    fn test_relative_permalink() {
        let id = post_id_from_permalink("/r/Sub/comments/q1w2e3/title/").unwrap();
        assert_eq!(id, "q1w2e3");
    }

    #[test]
    fn test_too_short_is_malformed() {
        for address in ["https://redd.it/abc", "/", "https://www.reddit.com/"] {
            let err = post_id_from_permalink(address).unwrap_err();
            assert!(
                matches!(err, FetchError::MalformedAddress(_)),
                "expected malformed for {}",
                address
            );
        }
    }

    #[test]
    fn test_non_post_paths_are_malformed() {
        for address in [
            "https://www.reddit.com/r/Serial/",
            "https://www.reddit.com/r/Serial/top/",
            "/r/Sub/comments/abc123/",
            "https://www.reddit.com/user/someone/submitted/",
        ] {
            let err = post_id_from_permalink(address).unwrap_err();
            assert!(
                matches!(err, FetchError::MalformedAddress(_)),
                "expected malformed for {}",
                address
            );
        }
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            post_id_from_permalink("not a url"),
            Err(FetchError::MalformedAddress(_))
        ));
        assert!(matches!(
            post_id_from_permalink(""),
            Err(FetchError::MalformedAddress(_))
        ));
    }
}
