pub mod decoder;
pub mod identity_event;
mod payload;
pub mod user_profile;

/// Provider event type for a newly registered account
pub const USER_CREATED: &str = "user.created";
/// Provider event type for a profile or metadata change
pub const USER_UPDATED: &str = "user.updated";
/// Provider event type for an account removal
pub const USER_DELETED: &str = "user.deleted";
