//! Local user store backed by the `users` table.
//!
//! Both upserts are a single `INSERT .. ON CONFLICT .. DO UPDATE .. RETURNING`
//! statement, so concurrent deliveries for one identity serialize inside
//! SQLite and never produce a second row. The role column is only part of
//! the update set when the event carried a role; otherwise the stored value
//! survives the update untouched. Matching on email still lets an identity
//! change its address: the id clause picks the update up.

use crate::{DbError, Result as DbErrorResult};

use ids_core::{Result as CoreErrorResult, Role, RoleUpdate, UserDraft, UserRecord, UserStore};

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};

const RETURNING_COLUMNS: &str =
    "RETURNING id, email, display_name, avatar_url, role, created_at, updated_at";

const SELECT_COLUMNS: &str =
    "SELECT id, email, display_name, avatar_url, role, created_at, updated_at FROM users";

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    role: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: UserRow) -> DbErrorResult<Self> {
        let role = Role::from_str(&row.role).map_err(|e| DbError::InvalidRow {
            message: format!("Invalid role in users.role: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(UserRecord {
            created_at: timestamp(row.created_at, "users.created_at")?,
            updated_at: timestamp(row.updated_at, "users.updated_at")?,
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            role,
        })
    }
}

#[track_caller]
fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::InvalidRow {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Conflict target for an upsert
#[derive(Clone, Copy)]
enum UpsertKey {
    Email,
    Id,
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert, or update the row owning `draft.email`; that row keeps its id.
    /// When no row owns the email but one owns `draft.id`, its email moves.
    pub async fn upsert_by_email(&self, draft: &UserDraft) -> DbErrorResult<UserRecord> {
        self.upsert(draft, UpsertKey::Email).await
    }

    /// Insert, or update the row with `draft.id`, including its email.
    pub async fn upsert_by_provider_id(&self, draft: &UserDraft) -> DbErrorResult<UserRecord> {
        self.upsert(draft, UpsertKey::Id).await
    }

    async fn upsert(&self, draft: &UserDraft, key: UpsertKey) -> DbErrorResult<UserRecord> {
        let sql = upsert_sql(key, draft.role);
        let now = Utc::now().timestamp();

        let row: UserRow = sqlx::query_as(&sql)
            .bind(&draft.id)
            .bind(&draft.email)
            .bind(&draft.display_name)
            .bind(&draft.avatar_url)
            .bind(draft.role.initial_role().as_str())
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        UserRecord::try_from(row)
    }

    pub async fn find_by_id(&self, id: &str) -> DbErrorResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRecord::try_from).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("{} WHERE email = ?", SELECT_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        row.map(UserRecord::try_from).transpose()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns false when no row matched
    pub async fn delete_by_id(&self, id: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn upsert_sql(key: UpsertKey, role: RoleUpdate) -> String {
    let role_update = if role.overwrites() {
        "role = excluded.role, "
    } else {
        ""
    };
    let keep_email = format!(
        "display_name = excluded.display_name, \
         avatar_url = excluded.avatar_url, \
         {role_update}updated_at = excluded.updated_at"
    );
    let move_email = format!("email = excluded.email, {keep_email}");

    // Chained targets are tried in order; the id clause catches an email change
    let conflict_clauses = match key {
        UpsertKey::Email => format!(
            "ON CONFLICT(email) DO UPDATE SET {keep_email} \
             ON CONFLICT(id) DO UPDATE SET {move_email}"
        ),
        UpsertKey::Id => format!("ON CONFLICT(id) DO UPDATE SET {move_email}"),
    };

    format!(
        r#"
            INSERT INTO users (id, email, display_name, avatar_url, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            {conflict_clauses}
            {RETURNING_COLUMNS}
        "#
    )
}

#[async_trait]
impl UserStore for UserRepository {
    async fn upsert_by_email(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord> {
        Ok(UserRepository::upsert_by_email(self, draft).await?)
    }

    async fn upsert_by_provider_id(&self, draft: &UserDraft) -> CoreErrorResult<UserRecord> {
        Ok(UserRepository::upsert_by_provider_id(self, draft).await?)
    }

    async fn delete_by_id(&self, id: &str) -> CoreErrorResult<bool> {
        Ok(UserRepository::delete_by_id(self, id).await?)
    }
}
