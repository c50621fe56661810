use std::fmt;

use crate::config::CacheTokenFn;

/// Query parameter carrying the cache-busting token.
pub const CACHE_BUST_PARAM: &str = "ts";

/// Milliseconds since the Unix epoch, as a decimal string.
pub fn current_cache_token() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Turns a backend-supplied path or URL into an absolute one.
///
/// With `bust`, a `ts=<now>` parameter is appended so a reused server-side
/// filename is never served from a stale cache.
pub fn resolve(maybe_path: &str, base_url: &str, bust: bool) -> String {
    let token = bust.then(current_cache_token);
    resolve_with_token(maybe_path, base_url, token.as_deref())
}

/// Deterministic form of [`resolve`] taking the cache-busting token explicitly.
pub fn resolve_with_token(maybe_path: &str, base_url: &str, token: Option<&str>) -> String {
    if maybe_path.is_empty() {
        return String::new();
    }

    let mut url = if is_absolute(maybe_path) {
        maybe_path.to_string()
    } else {
        let base = base_url.trim_end_matches('/');
        if maybe_path.starts_with('/') {
            format!("{base}{maybe_path}")
        } else {
            format!("{base}/{maybe_path}")
        }
    };

    if let Some(token) = token {
        let separator = if url.contains('?') { '&' } else { '?' };
        url.push(separator);
        url.push_str(CACHE_BUST_PARAM);
        url.push('=');
        url.push_str(token);
    }
    url
}

fn is_absolute(candidate: &str) -> bool {
    candidate.starts_with("http://") || candidate.starts_with("https://")
}

/// Resolver bound to one backend base URL and a token source.
#[derive(Clone)]
pub struct UrlResolver {
    base_url: String,
    cache_token: CacheTokenFn,
}

impl UrlResolver {
    pub fn with_token_source(base_url: impl Into<String>, cache_token: CacheTokenFn) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            cache_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, maybe_path: &str, bust: bool) -> String {
        let token = bust.then(|| (self.cache_token)());
        resolve_with_token(maybe_path, &self.base_url, token.as_deref())
    }
}

impl fmt::Debug for UrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::{resolve, resolve_with_token, UrlResolver};

    const BASE: &str = "https://api.example.com";

    #[test]
    fn empty_path_stays_empty() {
        assert_eq!(resolve("", BASE, true), "");
        assert_eq!(resolve("", BASE, false), "");
    }

    #[test]
    fn relative_path_is_prefixed_with_base() {
        assert_eq!(
            resolve("/files/a.docx", BASE, false),
            "https://api.example.com/files/a.docx"
        );
        assert_eq!(
            resolve_with_token("/files/a.docx", BASE, Some("123")),
            "https://api.example.com/files/a.docx?ts=123"
        );
    }

    #[test]
    fn trailing_and_missing_slashes_are_normalized() {
        assert_eq!(
            resolve("/out/r.docx", "https://api.example.com/", false),
            "https://api.example.com/out/r.docx"
        );
        assert_eq!(
            resolve("out/r.docx", BASE, false),
            "https://api.example.com/out/r.docx"
        );
    }

    #[test]
    fn absolute_url_is_never_prefixed() {
        assert_eq!(
            resolve("https://cdn.example.com/a.pdf", BASE, false),
            "https://cdn.example.com/a.pdf"
        );
        assert_eq!(
            resolve_with_token("http://cdn.example.com/a.pdf", BASE, Some("7")),
            "http://cdn.example.com/a.pdf?ts=7"
        );
    }

    #[test]
    fn token_joins_existing_query_with_ampersand() {
        assert_eq!(
            resolve_with_token("/out/r.pdf?inline=1", BASE, Some("9")),
            "https://api.example.com/out/r.pdf?inline=1&ts=9"
        );
    }

    #[test]
    fn busted_token_changes_over_time() {
        let first = resolve("/files/a.docx", BASE, true);
        thread::sleep(Duration::from_millis(5));
        let second = resolve("/files/a.docx", BASE, true);

        assert!(first.starts_with("https://api.example.com/files/a.docx?ts="));
        assert!(second.starts_with("https://api.example.com/files/a.docx?ts="));
        assert_ne!(first, second);
    }

    #[test]
    fn resolver_uses_injected_token_source() {
        let resolver =
            UrlResolver::with_token_source("https://api.example.com/", Arc::new(|| "42".to_string()));
        assert_eq!(resolver.base_url(), BASE);
        assert_eq!(
            resolver.resolve("/out/r.docx", true),
            "https://api.example.com/out/r.docx?ts=42"
        );
        assert_eq!(
            resolver.resolve("/out/r.docx", false),
            "https://api.example.com/out/r.docx"
        );
    }
}
