//! URL-to-domain normalization.
//!
//! Credibility lookups key off a bare domain. This module turns arbitrary
//! article URLs into that form: host component, lower-cased, leading `www.`
//! stripped. Malformed input is never an error here; a missing domain
//! degrades to UNKNOWN credibility at the classification layer.

use url::Url;

/// Extract the normalized domain from a URL.
///
/// Parses the URL, takes the host component, lower-cases it, and strips a
/// leading `www.` prefix.
///
/// # Arguments
///
/// * `url` - The URL to normalize
///
/// # Returns
///
/// The normalized domain, or `None` when the URL cannot be parsed or has no
/// usable host. Callers treat `None` as UNKNOWN credibility, never as a
/// fatal error.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://www.BBC.com/news/x"), Some("bbc.com".into()));
/// assert_eq!(extract_domain("not a url"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let domain = host.strip_prefix("www.").unwrap_or(&host);
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_www() {
        assert_eq!(
            extract_domain("https://www.BBC.com/news/world-123"),
            Some("bbc.com".to_string())
        );
    }

    #[test]
    fn test_plain_domain_passes_through() {
        assert_eq!(
            extract_domain("https://altnews.in/some-story"),
            Some("altnews.in".to_string())
        );
    }

    #[test]
    fn test_subdomain_preserved() {
        assert_eq!(
            extract_domain("https://timesofindia.indiatimes.com/india/story.cms"),
            Some("timesofindia.indiatimes.com".to_string())
        );
    }

    #[test]
    fn test_path_not_included() {
        assert_eq!(
            extract_domain("https://www.reuters.com/fact-check/some-claim"),
            Some("reuters.com".to_string())
        );
    }

    #[test]
    fn test_malformed_input_is_none() {
        assert_eq!(extract_domain("not a url"), None);
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("://missing-scheme"), None);
    }

    #[test]
    fn test_hostless_url_is_none() {
        assert_eq!(extract_domain("mailto:tips@example.com"), None);
    }

    #[test]
    fn test_idempotent_across_calls() {
        let url = "https://www.snopes.com/fact-check/example";
        assert_eq!(extract_domain(url), extract_domain(url));
    }
}
