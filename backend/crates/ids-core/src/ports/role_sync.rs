use crate::{Result as CoreErrorResult, Role};

use async_trait::async_trait;

/// Outward push of the committed role into the provider's private metadata.
///
/// Failures surface as [`crate::CoreError::SyncUnavailable`].
#[async_trait]
pub trait RoleSync: Send + Sync {
    async fn push_role(&self, provider_id: &str, role: Role) -> CoreErrorResult<()>;
}
