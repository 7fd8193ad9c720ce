//! Post body cleanup
//!
//! Bodies come back from the API with a few artifacts that look bad once
//! rendered: the continuation link itself, and escaped zero-width spaces that
//! some editors insert as paragraph spacers.

use crate::chain::link::NextLinkPattern;

/// Escaped zero-width space as it appears in API responses
const ZERO_WIDTH_SPACE: &str = "&amp;#x200B;";

/// Cleans a post body
///
/// Steps, in order:
/// 1. Drop every line that contains a continuation link
/// 2. Drop escaped zero-width spaces (with their trailing newline, if any)
/// 3. Trim surrounding whitespace
///
/// Removing an artifact can glue text into a new continuation link or a new
/// artifact, so the steps are repeated until the text stops changing. The
/// result is therefore idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(pattern: &NextLinkPattern, body: &str) -> String {
    let mut current = sanitize_pass(pattern, body);

    loop {
        let next = sanitize_pass(pattern, &current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Runs each cleanup step once
fn sanitize_pass(pattern: &NextLinkPattern, body: &str) -> String {
    let kept = body
        .split('\n')
        .filter(|line| !pattern.is_next_link(line))
        .collect::<Vec<_>>()
        .join("\n");

    let without_spacers = kept
        .replace(&format!("{}\n", ZERO_WIDTH_SPACE), "")
        .replace(ZERO_WIDTH_SPACE, "");

    without_spacers.trim().to_string()
}
