use ids_core::{
    CoreError, Result as CoreErrorResult, Role, RoleSync, UserDraft, UserRecord, UserStore,
};

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

/// Store double keyed by id, applying the same role rule as the SQL store
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
    fail_writes: bool,
}

impl InMemoryUserStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, record: UserRecord) {
        self.users.lock().unwrap().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.lock().unwrap().get(id).cloned()
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        self.users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.email == email)
            .count()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Lookup and write happen under one lock, like the single SQL statement
    fn write(&self, draft: &UserDraft, by_email: bool) -> CoreErrorResult<UserRecord> {
        if self.fail_writes {
            return Err(CoreError::store("database is locked"));
        }

        let mut users = self.users.lock().unwrap();
        let now = Utc::now();

        let existing = if by_email {
            // Email owner first, then the row holding the id (an email change)
            users
                .values()
                .find(|u| u.email == draft.email)
                .or_else(|| users.get(&draft.id))
                .cloned()
        } else {
            users.get(&draft.id).cloned()
        };

        if let Some(existing) = &existing
            && users
                .values()
                .any(|u| u.email == draft.email && u.id != existing.id)
        {
            return Err(CoreError::store("UNIQUE constraint failed: users.email"));
        }

        let record = match existing {
            Some(existing) => UserRecord {
                email: draft.email.clone(),
                display_name: draft.display_name.clone(),
                avatar_url: draft.avatar_url.clone(),
                role: draft.role.apply(Some(existing.role)),
                updated_at: now,
                ..existing
            },
            None => {
                if users.contains_key(&draft.id) {
                    return Err(CoreError::store("UNIQUE constraint failed: users.id"));
                }
                UserRecord {
                    id: draft.id.clone(),
                    email: draft.email.clone(),
                    display_name: draft.display_name.clone(),
                    avatar_url: draft.avatar_url.clone(),
                    role: draft.role.initial_role(),
                    created_at: now,
                    updated_at: now,
                }
            }
        };

        users.insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn upsert_by_email(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord> {
        self.write(draft, true)
    }

    async fn upsert_by_provider_id(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord> {
        self.write(draft, false)
    }

    async fn delete_by_id(&self, id: &str) -> CoreErrorResult<bool> {
        if self.fail_writes {
            return Err(CoreError::store("database is locked"));
        }
        Ok(self.users.lock().unwrap().remove(id).is_some())
    }
}

/// Records every push; optionally fails them all
#[derive(Default)]
pub struct RecordingRoleSync {
    pushes: Mutex<Vec<(String, Role)>>,
    fail: bool,
}

impl RecordingRoleSync {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn pushes(&self) -> Vec<(String, Role)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleSync for RecordingRoleSync {
    async fn push_role(&self, provider_id: &str, role: Role) -> CoreErrorResult<()> {
        self.pushes
            .lock()
            .unwrap()
            .push((provider_id.to_string(), role));

        if self.fail {
            return Err(CoreError::sync_unavailable("provider timed out"));
        }
        Ok(())
    }
}

pub fn admin_record(id: &str, email: &str) -> UserRecord {
    let now = Utc::now();
    UserRecord {
        id: id.to_string(),
        email: email.to_string(),
        display_name: "Existing Admin".to_string(),
        avatar_url: None,
        role: Role::Admin,
        created_at: now,
        updated_at: now,
    }
}
