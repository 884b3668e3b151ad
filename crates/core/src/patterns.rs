//! URL pattern matching
//!
//! Pure predicates over URLs: trackability, hostname extraction, and the
//! domain/regex rule matching used by limit enforcement. Every function
//! fails closed - an unparseable URL or invalid pattern yields "no match",
//! never an error.

use regex::Regex;
use tabguard_domain::constants::{
    BLANK_PAGE_URL, BLOCKED_PAGE_URL, INTERNAL_SCHEME_PREFIXES, TRACKABLE_SCHEMES,
};
use tabguard_domain::MatchType;
use url::Url;

/// Whether time spent on this URL should be tracked at all.
///
/// False for empty URLs, non-http(s)/file schemes, internal extension
/// pages, the blocking page itself, and the blank-page sentinel.
pub fn is_trackable_url(url: &str) -> bool {
    if url.is_empty() || url == BLANK_PAGE_URL || url == BLOCKED_PAGE_URL {
        return false;
    }
    if INTERNAL_SCHEME_PREFIXES.iter().any(|prefix| url.starts_with(prefix)) {
        return false;
    }
    TRACKABLE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// The URL's hostname, or the empty string when the URL fails to parse.
pub fn extract_domain(url: &str) -> String {
    Url::parse(url).ok().and_then(|parsed| parsed.host_str().map(ToString::to_string)).unwrap_or_default()
}

/// Hostname equals `pattern`, or is a subdomain of it.
pub fn matches_domain(url: &str, pattern: &str) -> bool {
    let domain = extract_domain(url);
    if domain.is_empty() {
        return false;
    }
    domain == pattern || domain.ends_with(&format!(".{pattern}"))
}

/// Test `pattern` as a regular expression against the full URL string.
/// An invalid pattern never matches.
pub fn matches_regex(url: &str, pattern: &str) -> bool {
    Regex::new(pattern).map(|regex| regex.is_match(url)).unwrap_or(false)
}

/// Whether `pattern` compiles as a regular expression.
pub fn is_valid_regex(pattern: &str) -> bool {
    Regex::new(pattern).is_ok()
}

/// Dispatch on the rule's match type.
pub fn matches(url: &str, pattern: &str, match_type: MatchType) -> bool {
    match match_type {
        MatchType::Domain => matches_domain(url, pattern),
        MatchType::Regex => matches_regex(url, pattern),
    }
}

/// Whether the URL's domain equals or is a subdomain of any exclusion entry.
pub fn is_excluded(url: &str, exclusions: &[String]) -> bool {
    let domain = extract_domain(url);
    if domain.is_empty() {
        return false;
    }
    exclusions
        .iter()
        .any(|exclusion| domain == *exclusion || domain.ends_with(&format!(".{exclusion}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_and_blank_urls_are_not_trackable() {
        assert!(!is_trackable_url(""));
        assert!(!is_trackable_url("about:blank"));
        assert!(!is_trackable_url("chrome://settings"));
        assert!(!is_trackable_url("chrome-extension://abc/popup.html"));
        assert!(!is_trackable_url(BLOCKED_PAGE_URL));
        assert!(!is_trackable_url("ftp://host/file"));
    }

    #[test]
    fn web_and_file_urls_are_trackable() {
        assert!(is_trackable_url("https://example.com/"));
        assert!(is_trackable_url("http://example.com/a?b=c"));
        assert!(is_trackable_url("file:///home/user/doc.html"));
    }

    #[test]
    fn extract_domain_is_stable_under_reconstruction() {
        for url in ["https://sub.example.com/path?q=1", "http://example.com/", "https://a.b.c.io"]
        {
            let domain = extract_domain(url);
            assert!(!domain.is_empty());
            let rebuilt = format!("https://{domain}/x");
            assert_eq!(extract_domain(&rebuilt), domain);
        }
    }

    #[test]
    fn extract_domain_of_garbage_is_empty() {
        assert_eq!(extract_domain("not a url"), "");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn domain_pattern_matches_host_and_subdomains() {
        assert!(matches_domain("https://example.com/", "example.com"));
        assert!(matches_domain("https://sub.example.com/path", "example.com"));
        assert!(!matches_domain("https://notexample.com/", "example.com"));
        assert!(!matches_domain("https://example.com.evil.io/", "example.com"));
    }

    #[test]
    fn invalid_regex_never_matches() {
        assert!(!matches_regex("https://example.com/", "("));
        assert!(!is_valid_regex("("));
        assert!(is_valid_regex(r"^https://.*\.example\.com/"));
    }

    #[test]
    fn regex_pattern_tests_the_full_url() {
        assert!(matches_regex("https://example.com/watch?v=1", r"/watch\?"));
        assert!(!matches_regex("https://example.com/read", r"/watch\?"));
    }

    #[test]
    fn match_dispatch_follows_the_rule_type() {
        assert!(matches("https://news.example.com/", "example.com", MatchType::Domain));
        assert!(matches("https://news.example.com/", r"news\.", MatchType::Regex));
        assert!(!matches("https://news.example.com/", r"news\.", MatchType::Domain));
    }

    #[test]
    fn exclusions_cover_subdomains() {
        let exclusions = vec!["localhost".to_string(), "internal.corp".to_string()];
        assert!(is_excluded("http://localhost:3000/", &exclusions));
        assert!(is_excluded("https://wiki.internal.corp/page", &exclusions));
        assert!(!is_excluded("https://example.com/", &exclusions));
        assert!(!is_excluded("not a url", &exclusions));
    }
}
