use ids_core::{Role, UserRecord};

/// Result of mirroring the committed role to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSyncStatus {
    Synced(Role),
    /// The local write stands; the provider still holds a stale role
    Failed { role: Role, reason: String },
}

/// What a single event did to the local store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Upserted {
        user: UserRecord,
        role_sync: RoleSyncStatus,
    },
    Deleted {
        provider_id: String,
        /// False when there was no record to remove
        removed: bool,
    },
    Ignored {
        kind: String,
    },
}

impl ReconcileOutcome {
    /// Short label for logs, metrics and the delivery log
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upserted { .. } => "upserted",
            Self::Deleted { removed: true, .. } => "deleted",
            Self::Deleted { removed: false, .. } => "delete_noop",
            Self::Ignored { .. } => "ignored",
        }
    }

    pub fn role_sync(&self) -> Option<&RoleSyncStatus> {
        match self {
            Self::Upserted { role_sync, .. } => Some(role_sync),
            _ => None,
        }
    }
}
