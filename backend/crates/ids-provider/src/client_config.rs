use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the provider's backend API
#[derive(Clone)]
pub struct ProviderClientConfig {
    /// Base URL, e.g. `https://api.clerk.com`
    pub api_url: String,
    /// Server-side secret key, sent as a bearer token
    pub secret_key: String,
    /// Per-attempt timeout
    pub timeout: Duration,
}

impl ProviderClientConfig {
    pub fn new(api_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            secret_key: secret_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ProviderClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClientConfig")
            .field("api_url", &self.api_url)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
