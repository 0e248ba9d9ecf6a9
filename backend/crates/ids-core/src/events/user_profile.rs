use crate::Role;

/// Identity attributes carried by an upsert-class event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub provider_id: String,
    /// Normalized primary address
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Role from the provider's private metadata, if it carried one
    pub requested_role: Option<Role>,
}
