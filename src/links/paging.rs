//! Paging URL composition
//!
//! Paged links keep every clause of the current request's query string
//! except the page boundary. The boundary is a `limit(n)` or `limit(n,m)`
//! clause; it is cut out and the clauses on either side are spliced back
//! together with a single `&` or `|` separator.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn limit_clause_regex() -> &'static Regex {
    static LIMIT_CLAUSE: OnceLock<Regex> = OnceLock::new();
    LIMIT_CLAUSE.get_or_init(|| {
        Regex::new(r"limit\([0-9]+(,[0-9]+)?\)").expect("limit clause pattern is valid")
    })
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn is_separator(c: char) -> bool {
    c == '&' || c == '|'
}

/// Decode a raw, URL-encoded query string
///
/// A leading `?` is dropped, `+` decodes to a space and invalid UTF-8 is
/// replaced rather than rejected.
pub fn decode_query(raw: &str) -> String {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Remove the first page-boundary clause from a decoded query string
///
/// Returns the input unchanged when no `limit(...)` clause is present.
pub fn strip_limit_clause(query: &str) -> Cow<'_, str> {
    let Some(clause) = limit_clause_regex().find(query) else {
        return Cow::Borrowed(query);
    };

    let mut prefix = &query[..clause.start()];
    let mut suffix = &query[clause.end()..];

    if is_blank(prefix) {
        if is_blank(suffix) {
            return Cow::Borrowed("");
        }
        return Cow::Borrowed(suffix.strip_prefix(is_separator).unwrap_or(suffix));
    }

    if is_blank(suffix) {
        return Cow::Borrowed(prefix.strip_suffix(is_separator).unwrap_or(prefix));
    }

    // Keep exactly one separator at the splice point
    match (prefix.chars().last(), suffix.chars().next()) {
        (Some('&'), Some('&')) | (Some('|'), Some('|')) => suffix = &suffix[1..],
        (Some('&'), Some('|')) | (Some('|'), Some('&')) => prefix = &prefix[..prefix.len() - 1],
        _ => {}
    }

    Cow::Owned(format!("{}{}", prefix, suffix))
}

/// Page window `(offset, limit)` requested by a raw query string
///
/// `limit(n)` is the first `n` items; `limit(o,n)` skips `o` items first.
pub fn requested_window(raw_query: &str) -> Option<(usize, usize)> {
    let decoded = decode_query(raw_query);
    let clause = limit_clause_regex().find(&decoded)?.as_str();
    let args = clause.strip_prefix("limit(")?.strip_suffix(')')?;

    match args.split_once(',') {
        Some((offset, limit)) => Some((offset.parse().ok()?, limit.parse().ok()?)),
        None => Some((0, args.parse().ok()?)),
    }
}

/// Build the href of a paged link
///
/// `base` is `scheme://host`, `route` the path (and query) produced by the
/// link rule, `existing_query` the raw query string of the current request.
///
/// # Example
///
/// ```
/// use hal::links::paging::compose_paged_uri;
///
/// let href = compose_paged_uri("http://host", "/items?skip=10", "filter(x)&limit(0,10)");
/// assert_eq!(href, "http://host/items?skip=10&filter(x)");
/// ```
pub fn compose_paged_uri(base: &str, route: &str, existing_query: &str) -> String {
    if is_blank(existing_query) {
        return format!("{}{}", base, route);
    }

    let decoded = decode_query(existing_query);
    let merged = strip_limit_clause(&decoded);

    if is_blank(&merged) {
        format!("{}{}", base, route)
    } else {
        format!("{}{}&{}", base, route, merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://host";

    #[test]
    fn test_empty_query_returns_route_only() {
        assert_eq!(compose_paged_uri(BASE, "/items", ""), "http://host/items");
        assert_eq!(compose_paged_uri(BASE, "/items", "   "), "http://host/items");
    }

    #[test]
    fn test_limit_clause_at_end() {
        assert_eq!(
            compose_paged_uri(BASE, "/items?skip=10", "filter(x)&limit(0,10)"),
            "http://host/items?skip=10&filter(x)"
        );
    }

    #[test]
    fn test_limit_clause_at_start() {
        assert_eq!(strip_limit_clause("limit(10)&filter(x)"), "filter(x)");
        assert_eq!(strip_limit_clause("limit(10)|filter(x)"), "filter(x)");
    }

    #[test]
    fn test_limit_clause_alone() {
        assert_eq!(strip_limit_clause("limit(5,5)"), "");
        assert_eq!(compose_paged_uri(BASE, "/items", "limit(5,5)"), "http://host/items");
    }

    #[test]
    fn test_limit_clause_trailing_pipe() {
        assert_eq!(strip_limit_clause("a(1)|limit(3)"), "a(1)");
    }

    #[test]
    fn test_splice_separators() {
        assert_eq!(strip_limit_clause("a(1)&limit(0,10)&b(2)"), "a(1)&b(2)");
        assert_eq!(strip_limit_clause("a(1)&limit(0,10)|b(2)"), "a(1)|b(2)");
        assert_eq!(strip_limit_clause("a(1)|limit(0,10)|b(2)"), "a(1)|b(2)");
        assert_eq!(strip_limit_clause("a(1)|limit(0,10)&b(2)"), "a(1)&b(2)");
    }

    #[test]
    fn test_splice_without_separators_concatenates() {
        assert_eq!(strip_limit_clause("a(1)limit(2)b(3)"), "a(1)b(3)");
    }

    #[test]
    fn test_no_limit_clause_appends_everything() {
        assert_eq!(
            compose_paged_uri(BASE, "/items", "filter(x)&sort(+name)"),
            "http://host/items&filter(x)&sort( name)"
        );
        assert_eq!(strip_limit_clause("limit(x)"), "limit(x)");
    }

    #[test]
    fn test_query_is_decoded() {
        assert_eq!(
            compose_paged_uri(BASE, "/items?x=1", "?name%3D%27a%20b%27&limit(0%2C10)"),
            "http://host/items?x=1&name='a b'"
        );
    }

    #[test]
    fn test_decode_query() {
        assert_eq!(decode_query("?a%26b+c"), "a&b c");
        assert_eq!(decode_query("plain"), "plain");
        assert_eq!(decode_query("bad%FF"), "bad\u{FFFD}");
    }

    #[test]
    fn test_only_first_limit_clause_is_removed() {
        assert_eq!(strip_limit_clause("limit(1)&limit(2)"), "limit(2)");
    }

    #[test]
    fn test_requested_window() {
        assert_eq!(requested_window("filter(x)&limit(20,10)"), Some((20, 10)));
        assert_eq!(requested_window("?limit(5)"), Some((0, 5)));
        assert_eq!(requested_window("filter(x)"), None);
        assert_eq!(requested_window(""), None);
    }
}
