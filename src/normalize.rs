//! URL validation and normalization.
//!
//! Canonical rewriting ahead of a lookup: default the scheme to `https`
//! when none is given, parse, and strip the fragment. The fragment never
//! reaches the server anyway, so two inputs differing only in fragment
//! must produce the same verdict.

use url::Url;

/// A URL with an explicit `http`/`https` scheme and no fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// True iff `input` normalizes to a syntactically valid URL.
pub fn validate(input: &str) -> bool {
    normalize(input).is_some()
}

/// Canonicalize `input`: prepend `https://` when no scheme prefix is
/// present, parse, and clear the fragment. `None` on parse failure.
pub fn normalize(input: &str) -> Option<NormalizedUrl> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let mut parsed = Url::parse(&with_scheme).ok()?;
    parsed.set_fragment(None);

    Some(NormalizedUrl(parsed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = normalize("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn explicit_http_scheme_is_kept() {
        let url = normalize("http://example.com/path").unwrap();
        assert_eq!(url.as_str(), "http://example.com/path");
    }

    #[test]
    fn fragment_is_stripped() {
        let url = normalize("https://example.com/page#section-2").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
        assert!(!url.as_str().contains('#'));
    }

    #[test]
    fn query_survives_normalization() {
        let url = normalize("example.com/search?q=rust#results").unwrap();
        assert_eq!(url.as_str(), "https://example.com/search?q=rust");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize("not a url").is_none());
        assert!(!validate("not a url"));
    }

    #[test]
    fn empty_and_whitespace_are_rejected() {
        assert!(normalize("").is_none());
        assert!(normalize("   ").is_none());
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(normalize("https://exa mple.com").is_none());
        assert!(normalize("javascript:alert(1)").is_none());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let url = normalize("  example.com  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["example.com", "http://example.com/a?b=c#d", "https://example.com"] {
            let once = normalize(input).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }
}
