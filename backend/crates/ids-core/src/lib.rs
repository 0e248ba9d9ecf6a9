pub mod error;
pub mod events;
pub mod models;
pub mod ports;

pub use error::{CoreError, Result};
pub use events::decoder::decode_event;
pub use events::identity_event::IdentityEvent;
pub use events::user_profile::UserProfile;
pub use models::email::normalize_email;
pub use models::role::Role;
pub use models::role_update::{RoleUpdate, resolve_role_update};
pub use models::user_draft::UserDraft;
pub use models::user_record::UserRecord;
pub use ports::match_key::MatchKey;
pub use ports::role_sync::RoleSync;
pub use ports::user_store::UserStore;

#[cfg(test)]
mod tests;
