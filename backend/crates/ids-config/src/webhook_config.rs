use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DELIVERY_RETENTION_HOURS, DEFAULT_TOLERANCE_SECS,
    MAX_DELIVERY_RETENTION_HOURS, MAX_TOLERANCE_SECS, MIN_TOLERANCE_SECS,
};

use std::fmt;
use std::time::Duration;

use ids_auth::SigningSecret;
use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// `whsec_<base64>` secret from the provider dashboard
    pub signing_secret: Option<String>,
    /// Accepted clock skew, both directions
    pub tolerance_secs: u64,
    /// How long processed delivery ids are kept (0 = never cleaned up)
    pub delivery_retention_hours: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            signing_secret: None,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
            delivery_retention_hours: DEFAULT_DELIVERY_RETENTION_HOURS,
        }
    }
}

impl WebhookConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.secret()?;

        if self.tolerance_secs < MIN_TOLERANCE_SECS || self.tolerance_secs > MAX_TOLERANCE_SECS {
            return Err(ConfigError::webhook(format!(
                "webhook.tolerance_secs must be {}-{}, got {}",
                MIN_TOLERANCE_SECS, MAX_TOLERANCE_SECS, self.tolerance_secs
            )));
        }

        if self.delivery_retention_hours > MAX_DELIVERY_RETENTION_HOURS {
            return Err(ConfigError::webhook(format!(
                "webhook.delivery_retention_hours must be <= {}, got {}",
                MAX_DELIVERY_RETENTION_HOURS, self.delivery_retention_hours
            )));
        }

        Ok(())
    }

    /// Parsed signing secret; missing or malformed is a fatal configuration error
    pub fn secret(&self) -> ConfigErrorResult<SigningSecret> {
        let raw = self
            .signing_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::webhook("webhook.signing_secret is required"))?;

        SigningSecret::parse(raw)
            .map_err(|e| ConfigError::webhook(format!("webhook.signing_secret is invalid: {}", e)))
    }

    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_secs)
    }

    /// Retention window in seconds; `None` when cleanup is disabled
    pub fn retention_secs(&self) -> Option<i64> {
        match self.delivery_retention_hours {
            0 => None,
            hours => i64::try_from(hours * 3600).ok(),
        }
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field(
                "signing_secret",
                &self.signing_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("tolerance_secs", &self.tolerance_secs)
            .field("delivery_retention_hours", &self.delivery_retention_hours)
            .finish()
    }
}
