use ids_core::{Role, RoleUpdate, UserDraft};

/// Draft with no requested role
pub fn draft(id: &str, email: &str) -> UserDraft {
    UserDraft {
        id: id.to_string(),
        email: email.to_string(),
        display_name: "Test User".to_string(),
        avatar_url: Some("https://img.example.com/u.png".to_string()),
        role: RoleUpdate::KeepExisting,
    }
}

/// Draft whose event carried a role
pub fn draft_with_role(id: &str, email: &str, role: Role) -> UserDraft {
    UserDraft {
        role: RoleUpdate::Overwrite(role),
        ..draft(id, email)
    }
}
