use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::resolve::{current_cache_token, UrlResolver};

/// Produces the cache-busting token appended to resolved result URLs.
pub type CacheTokenFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Immutable engine configuration, injected once at construction.
#[derive(Clone)]
pub struct EngineConfig {
    /// Backend root without a trailing slash.
    pub base_url: String,
    pub warmup_timeout: Duration,
    pub max_download_bytes: u64,
    pub cache_token: CacheTokenFn,
}

impl EngineConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            warmup_timeout: Duration::from_secs(30),
            max_download_bytes: 25 * 1024 * 1024,
            cache_token: Arc::new(current_cache_token),
        })
    }

    pub fn url_resolver(&self) -> UrlResolver {
        UrlResolver::with_token_source(self.base_url.clone(), self.cache_token.clone())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("base_url", &self.base_url)
            .field("warmup_timeout", &self.warmup_timeout)
            .field("max_download_bytes", &self.max_download_bytes)
            .finish_non_exhaustive()
    }
}
