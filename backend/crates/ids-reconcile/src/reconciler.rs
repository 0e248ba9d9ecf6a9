use crate::{ReconcileOutcome, RoleSyncStatus};

use ids_core::{
    IdentityEvent, MatchKey, Result as CoreErrorResult, RoleSync, UserDraft, UserProfile,
    UserStore,
};

use std::sync::Arc;

use log::{debug, info, warn};

/// Per-identity state machine `Unknown -> Active -> Deleted`.
///
/// Every transition is idempotent, so re-deliveries and concurrent
/// deliveries converge without any locking here. The store write always
/// commits before the provider push, and the push carries the committed
/// role rather than the requested one.
pub struct Reconciler {
    store: Arc<dyn UserStore>,
    role_sync: Arc<dyn RoleSync>,
    match_key: MatchKey,
}

impl Reconciler {
    pub fn new(store: Arc<dyn UserStore>, role_sync: Arc<dyn RoleSync>, match_key: MatchKey) -> Self {
        Self {
            store,
            role_sync,
            match_key,
        }
    }

    pub fn match_key(&self) -> MatchKey {
        self.match_key
    }

    /// Apply one event. Store failures abort before any provider call;
    /// provider failures are reported in the outcome, never as an error.
    pub async fn apply(&self, event: &IdentityEvent) -> CoreErrorResult<ReconcileOutcome> {
        match event {
            IdentityEvent::Upserted(profile) => self.upsert(profile).await,
            IdentityEvent::Deleted { provider_id } => self.delete(provider_id).await,
            IdentityEvent::Ignored { kind } => {
                debug!("Ignoring event kind '{}'", kind);
                Ok(ReconcileOutcome::Ignored { kind: kind.clone() })
            }
        }
    }

    async fn upsert(&self, profile: &UserProfile) -> CoreErrorResult<ReconcileOutcome> {
        let draft = UserDraft::from(profile);

        let user = match self.match_key {
            MatchKey::Email => self.store.upsert_by_email(&draft).await?,
            MatchKey::ProviderId => self.store.upsert_by_provider_id(&draft).await?,
        };

        info!(
            "Upserted user {} (provider id {}, role {})",
            user.id, profile.provider_id, user.role
        );

        let role_sync = match self.role_sync.push_role(&profile.provider_id, user.role).await {
            Ok(()) => RoleSyncStatus::Synced(user.role),
            Err(e) => {
                warn!(
                    "Role push for {} failed, provider still out of date: {}",
                    profile.provider_id, e
                );
                RoleSyncStatus::Failed {
                    role: user.role,
                    reason: e.to_string(),
                }
            }
        };

        Ok(ReconcileOutcome::Upserted { user, role_sync })
    }

    async fn delete(&self, provider_id: &str) -> CoreErrorResult<ReconcileOutcome> {
        let removed = self.store.delete_by_id(provider_id).await?;

        if removed {
            info!("Deleted user {}", provider_id);
        } else {
            debug!("No user {} to delete", provider_id);
        }

        Ok(ReconcileOutcome::Deleted {
            provider_id: provider_id.to_string(),
            removed,
        })
    }
}
