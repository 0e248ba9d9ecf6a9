use crate::{Result as CoreErrorResult, UserDraft, UserRecord};

use async_trait::async_trait;

/// Local user store.
///
/// Each upsert must be a single atomic operation in the backing store, so
/// that concurrent upserts for the same key serialize there and never leave
/// two records behind. Store failures surface as [`crate::CoreError::Store`].
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or update the record whose email matches `draft.email`.
    /// When no record has that email but one has `draft.id`, that record's
    /// email is updated instead. The id of an existing record never changes.
    async fn upsert_by_email(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord>;

    /// Insert or update the record whose id matches `draft.id`; email is
    /// updated like any other attribute.
    async fn upsert_by_provider_id(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord>;

    /// Remove the record with this id. Returns false when nothing matched,
    /// which is not an error.
    async fn delete_by_id(&self, id: &str) -> CoreErrorResult<bool>;
}
