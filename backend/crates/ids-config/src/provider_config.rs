use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PROVIDER_API_URL, DEFAULT_PROVIDER_TIMEOUT_SECS,
    MAX_PROVIDER_TIMEOUT_SECS, MIN_PROVIDER_TIMEOUT_SECS,
};

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the provider's backend API
    pub api_url: String,
    /// Server-side API key used for metadata pushes
    pub secret_key: Option<String>,
    /// Per-attempt request timeout
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_PROVIDER_API_URL),
            secret_key: None,
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::provider(format!(
                "provider.api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        self.secret_key()?;

        if self.timeout_secs < MIN_PROVIDER_TIMEOUT_SECS
            || self.timeout_secs > MAX_PROVIDER_TIMEOUT_SECS
        {
            return Err(ConfigError::provider(format!(
                "provider.timeout_secs must be {}-{}, got {}",
                MIN_PROVIDER_TIMEOUT_SECS, MAX_PROVIDER_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn secret_key(&self) -> ConfigErrorResult<&str> {
        self.secret_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::provider("provider.secret_key is required"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
