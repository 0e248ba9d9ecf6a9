use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};

/// A webhook delivery that has already been reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub delivery_id: String,
    pub event_type: String,
    pub outcome: String,
    pub processed_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct DeliveryRow {
    delivery_id: String,
    event_type: String,
    outcome: String,
    processed_at: i64,
}

pub struct DeliveryRepository {
    pool: SqlitePool,
}

impl DeliveryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_delivery_id(
        &self,
        delivery_id: &str,
    ) -> DbErrorResult<Option<DeliveryRecord>> {
        let row: Option<DeliveryRow> = sqlx::query_as(
            r#"
                SELECT delivery_id, event_type, outcome, processed_at
                FROM webhook_deliveries
                WHERE delivery_id = ?
            "#,
        )
        .bind(delivery_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| -> DbErrorResult<DeliveryRecord> {
            Ok(DeliveryRecord {
                processed_at: DateTime::from_timestamp(r.processed_at, 0).ok_or_else(|| {
                    DbError::InvalidRow {
                        message: "Invalid timestamp in webhook_deliveries.processed_at"
                            .to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?,
                delivery_id: r.delivery_id,
                event_type: r.event_type,
                outcome: r.outcome,
            })
        })
        .transpose()
    }

    /// Remember a processed delivery. Returns false if it was already recorded.
    pub async fn record(
        &self,
        delivery_id: &str,
        event_type: &str,
        outcome: &str,
    ) -> DbErrorResult<bool> {
        let processed_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO webhook_deliveries (delivery_id, event_type, outcome, processed_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(delivery_id) DO NOTHING
            "#,
        )
        .bind(delivery_id)
        .bind(event_type)
        .bind(outcome)
        .bind(processed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete records older than `max_age_seconds`; returns how many went
    pub async fn cleanup_old_entries(&self, max_age_seconds: i64) -> DbErrorResult<u64> {
        let cutoff = Utc::now().timestamp() - max_age_seconds;

        let result = sqlx::query("DELETE FROM webhook_deliveries WHERE processed_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
