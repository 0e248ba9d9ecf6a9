#![allow(dead_code)]

pub mod doubles;

pub use doubles::*;

use ids_core::{IdentityEvent, Role, UserProfile};

pub fn upserted(provider_id: &str, email: &str, requested_role: Option<Role>) -> IdentityEvent {
    IdentityEvent::Upserted(UserProfile {
        provider_id: provider_id.to_string(),
        email: email.to_string(),
        display_name: "Ada Lovelace".to_string(),
        avatar_url: None,
        requested_role,
    })
}

pub fn deleted(provider_id: &str) -> IdentityEvent {
    IdentityEvent::Deleted {
        provider_id: provider_id.to_string(),
    }
}
