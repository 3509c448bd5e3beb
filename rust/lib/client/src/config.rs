use std::time::Duration;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "FARMERP_API_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "FARMERP_API_TIMEOUT_SECS";

/// Connection settings for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every request path, without a trailing slash.
    ///
    /// Empty means same-origin: paths are used as given and must then be
    /// absolute URLs.
    pub base_url: String,

    /// Per-request timeout. `None` waits for the transport to settle.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read [`ENV_API_URL`] and [`ENV_API_TIMEOUT_SECS`] from the process
    /// environment. Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL).unwrap_or_default();
        let timeout = lookup(ENV_API_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring invalid {}", ENV_API_TIMEOUT_SECS);
                None
            }
        });
        Self {
            base_url: normalize_base(base_url),
            timeout,
        }
    }

    /// Join the base URL and a request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}
