//! Role authority rule.
//!
//! A role carried by the event wins over whatever is stored locally. When the
//! event carries no role, the local record is the authority and the provider
//! is brought back in line with it after the write. Records created without a
//! requested role start at [`Role::default`].

use crate::Role;

/// How an upsert treats the role column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleUpdate {
    /// The event requested this role; write it on insert and on update
    Overwrite(Role),
    /// No role requested; keep the stored role, new records get the default
    KeepExisting,
}

/// Decide which side is authoritative for the role of an upserted identity
pub fn resolve_role_update(requested: Option<Role>) -> RoleUpdate {
    match requested {
        Some(role) => RoleUpdate::Overwrite(role),
        None => RoleUpdate::KeepExisting,
    }
}

impl RoleUpdate {
    /// Role the record ends up with, given the role it had before (if any)
    pub fn apply(self, existing: Option<Role>) -> Role {
        match self {
            Self::Overwrite(role) => role,
            Self::KeepExisting => existing.unwrap_or_default(),
        }
    }

    /// Role written when no record exists yet
    pub fn initial_role(self) -> Role {
        self.apply(None)
    }

    pub fn overwrites(self) -> bool {
        matches!(self, Self::Overwrite(_))
    }
}
