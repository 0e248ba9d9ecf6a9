//! Outbound role push into the provider's private user metadata.

use crate::{ProviderClientConfig, ProviderError, Result as ProviderErrorResult, RetryPolicy, with_retry};

use ids_core::{Result as CoreErrorResult, Role, RoleSync};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::Serialize;

// Upper bound on how much of an error response ends up in the error text
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct MetadataPatch<'a> {
    private_metadata: PrivateMetadata<'a>,
}

#[derive(Serialize)]
struct PrivateMetadata<'a> {
    role: &'a str,
}

pub struct ProviderClient {
    base_url: String,
    secret_key: String,
    retry: RetryPolicy,
    http: ReqwestClient,
}

impl ProviderClient {
    pub fn new(config: ProviderClientConfig, retry: RetryPolicy) -> ProviderErrorResult<Self> {
        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Setup {
                message: format!("cannot build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key,
            retry,
            http,
        })
    }

    /// Overwrite the role in the identity's private metadata
    pub async fn push_role(&self, provider_id: &str, role: Role) -> ProviderErrorResult<()> {
        validate_provider_id(provider_id)?;

        with_retry(&self.retry, "push_role", || self.send_role(provider_id, role)).await
    }

    async fn send_role(&self, provider_id: &str, role: Role) -> ProviderErrorResult<()> {
        let url = format!("{}/v1/users/{}/metadata", self.base_url, provider_id);
        let body = MetadataPatch {
            private_metadata: PrivateMetadata {
                role: role.as_str(),
            },
        };

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Pushed role {} for {}", role, provider_id);
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(ProviderError::Status {
            status,
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Ids go into the URL path unescaped, so only URL-safe characters pass
#[track_caller]
fn validate_provider_id(provider_id: &str) -> ProviderErrorResult<()> {
    let valid = !provider_id.is_empty()
        && provider_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ProviderError::InvalidProviderId {
            id: provider_id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[async_trait]
impl RoleSync for ProviderClient {
    async fn push_role(&self, provider_id: &str, role: Role) -> CoreErrorResult<()> {
        Ok(ProviderClient::push_role(self, provider_id, role).await?)
    }
}
