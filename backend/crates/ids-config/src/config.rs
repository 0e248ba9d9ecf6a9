use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DatabaseConfig, LoggingConfig, ProviderConfig, ReconcileConfig, RetryConfig, ServerConfig,
    WebhookConfig,
};

use std::path::{Path, PathBuf};

const MATCH_KEY_ENV: &str = "IDS_RECONCILE_MATCH_KEY";

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub webhook: WebhookConfig,
    pub provider: ProviderConfig,
    pub retry: RetryConfig,
    pub reconcile: ReconcileConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDS_CONFIG_DIR env var, else use ./.ids/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDS_* environment variable overrides (an unknown match key is an error)
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.apply_env_match_key()?;

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDS_CONFIG_DIR env var > ./.ids/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.webhook.validate()?;
        self.provider.validate()?;
        self.retry.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections, busy timeout {}s)",
            self.database.path, self.database.max_connections, self.database.busy_timeout_secs
        );
        info!(
            "  webhook: secret {}, tolerance={}s, retention={}h",
            if self.webhook.signing_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.webhook.tolerance_secs,
            self.webhook.delivery_retention_hours
        );
        info!(
            "  provider: {} (key {}, timeout {}s)",
            self.provider.api_url,
            if self.provider.secret_key.is_some() {
                "set"
            } else {
                "missing"
            },
            self.provider.timeout_secs
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );
        info!("  reconcile: match on {}", self.reconcile.match_key);
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDS_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDS_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDS_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "IDS_DATABASE_BUSY_TIMEOUT_SECS",
            &mut self.database.busy_timeout_secs,
        );

        // Webhook; the conventional unprefixed name is read first so the
        // IDS_ name wins when both are set
        Self::apply_env_option_string("WEBHOOK_SECRET", &mut self.webhook.signing_secret);
        Self::apply_env_option_string(
            "IDS_WEBHOOK_SIGNING_SECRET",
            &mut self.webhook.signing_secret,
        );
        Self::apply_env_parse("IDS_WEBHOOK_TOLERANCE_SECS", &mut self.webhook.tolerance_secs);
        Self::apply_env_parse(
            "IDS_WEBHOOK_DELIVERY_RETENTION_HOURS",
            &mut self.webhook.delivery_retention_hours,
        );

        // Provider
        Self::apply_env_string("IDS_PROVIDER_API_URL", &mut self.provider.api_url);
        Self::apply_env_option_string("CLERK_SECRET_KEY", &mut self.provider.secret_key);
        Self::apply_env_option_string("IDS_PROVIDER_SECRET_KEY", &mut self.provider.secret_key);
        Self::apply_env_parse("IDS_PROVIDER_TIMEOUT_SECS", &mut self.provider.timeout_secs);

        // Retry
        Self::apply_env_parse("IDS_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "IDS_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("IDS_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "IDS_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("IDS_RETRY_JITTER", &mut self.retry.jitter);

        // Logging
        Self::apply_env_parse("IDS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDS_LOG_FILE", &mut self.logging.file);
    }

    /// Match key override. Unlike the other overrides, a value that does not
    /// parse is an error instead of falling back to the current setting.
    fn apply_env_match_key(&mut self) -> ConfigErrorResult<()> {
        if let Ok(val) = std::env::var(MATCH_KEY_ENV)
            && !val.trim().is_empty()
        {
            self.reconcile.match_key = val.parse().map_err(|_| {
                ConfigError::reconcile(format!(
                    "{} must be 'email' or 'provider_id', got '{}'",
                    MATCH_KEY_ENV, val
                ))
            })?;
        }
        Ok(())
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name)
            && !val.trim().is_empty()
        {
            *target = Some(val);
        }
    }
}
