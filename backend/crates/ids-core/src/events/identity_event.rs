use crate::UserProfile;

/// Decoded identity notification.
///
/// The kind set is closed: anything the decoder does not recognize ends up
/// as [`IdentityEvent::Ignored`], which reconciles to an acknowledged no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    /// Account created or updated at the provider
    Upserted(UserProfile),
    /// Account removed at the provider
    Deleted { provider_id: String },
    /// Event type this service does not handle
    Ignored { kind: String },
}

impl IdentityEvent {
    /// Short label for logs and metrics
    pub fn kind_label(&self) -> &str {
        match self {
            Self::Upserted(_) => "upserted",
            Self::Deleted { .. } => "deleted",
            Self::Ignored { .. } => "ignored",
        }
    }

    pub fn provider_id(&self) -> Option<&str> {
        match self {
            Self::Upserted(profile) => Some(&profile.provider_id),
            Self::Deleted { provider_id } => Some(provider_id),
            Self::Ignored { .. } => None,
        }
    }
}
