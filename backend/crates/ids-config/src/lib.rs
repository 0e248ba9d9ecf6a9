mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod provider_config;
mod reconcile_config;
mod retry_config;
mod server_config;
mod webhook_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use provider_config::ProviderConfig;
pub use reconcile_config::ReconcileConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use webhook_config::WebhookConfig;

pub const CONFIG_DIR_ENV: &str = "IDS_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".ids";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const MIN_DB_MAX_CONNECTIONS: u32 = 1;
const MAX_DB_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;
const MAX_BUSY_TIMEOUT_SECS: u64 = 60;

const DEFAULT_TOLERANCE_SECS: u64 = ids_auth::DEFAULT_TOLERANCE_SECS;
const MIN_TOLERANCE_SECS: u64 = 1;
const MAX_TOLERANCE_SECS: u64 = 3600;
const DEFAULT_DELIVERY_RETENTION_HOURS: u64 = 72;
const MAX_DELIVERY_RETENTION_HOURS: u64 = 24 * 30;

const DEFAULT_PROVIDER_API_URL: &str = "https://api.clerk.com";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;
const MIN_PROVIDER_TIMEOUT_SECS: u64 = 1;
const MAX_PROVIDER_TIMEOUT_SECS: u64 = 60;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
