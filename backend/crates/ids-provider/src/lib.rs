mod client;
mod client_config;
mod error;
mod retry;


pub use client::ProviderClient;
pub use client_config::{DEFAULT_TIMEOUT_SECS, ProviderClientConfig};
pub use error::{ProviderError, Result};
pub use retry::{IsRetryable, RetryPolicy, with_retry};
