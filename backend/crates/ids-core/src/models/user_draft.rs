use crate::{RoleUpdate, UserProfile, resolve_role_update};

/// Desired state of a user record, handed to the store for an atomic upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: RoleUpdate,
}

impl From<&UserProfile> for UserDraft {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.provider_id.clone(),
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            avatar_url: profile.avatar_url.clone(),
            role: resolve_role_update(profile.requested_role),
        }
    }
}
