//! Usage: Page-title parsing for the unread badge.

use regex::Regex;
use std::sync::LazyLock;

/// Substring identifying titles that belong to the Paper web app.
/// Transient titles from other notification sources (browser-style
/// `"Someone messaged you"` flicker) never contain it.
pub const TITLE_MARKER: &str = "Paper";

static UNREAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("UNREAD_RE is a valid static regex pattern"));

/// Maps an observed window title to an unread count.
///
/// Returns `None` when the title does not mention [`TITLE_MARKER`]; the
/// caller must leave the currently displayed badge unchanged in that
/// case. Otherwise returns the first parenthesized decimal integer in
/// the title, or 0 when there is none. Never fails: values too large
/// for `u32` degrade to 0 like any other non-matching input.
pub fn parse_unread_count(title: &str) -> Option<u32> {
    if !title.contains(TITLE_MARKER) {
        return None;
    }

    let count = UNREAD_RE
        .captures(title)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);

    Some(count)
}

#[cfg(test)]
mod tests {
    use super::parse_unread_count;

    #[test]
    fn titles_without_the_marker_leave_the_badge_alone() {
        assert_eq!(parse_unread_count(""), None);
        assert_eq!(parse_unread_count("Sindre messaged you"), None);
        assert_eq!(parse_unread_count("Inbox (3)"), None);
    }

    #[test]
    fn parenthesized_count_is_extracted() {
        assert_eq!(parse_unread_count("Paper — Inbox (5)"), Some(5));
        assert_eq!(parse_unread_count("(12) Paper"), Some(12));
        assert_eq!(parse_unread_count("Paper (0)"), Some(0));
    }

    #[test]
    fn first_parenthesized_number_wins() {
        assert_eq!(parse_unread_count("Paper (3) and also (7)"), Some(3));
    }

    #[test]
    fn marker_without_count_resets_to_zero() {
        assert_eq!(parse_unread_count("Paper — Inbox"), Some(0));
        assert_eq!(parse_unread_count("Paper (soon)"), Some(0));
        assert_eq!(parse_unread_count("Paper ()"), Some(0));
    }

    #[test]
    fn oversized_numbers_degrade_to_zero() {
        assert_eq!(parse_unread_count("Paper (99999999999999999999)"), Some(0));
    }
}
