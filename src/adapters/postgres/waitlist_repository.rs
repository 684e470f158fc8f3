//! PostgreSQL implementation of WaitlistRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DayDate, DomainError, ErrorCode, QueueId, Timestamp,
    WaitlistEntryId,
};
use crate::domain::waitlist::{WaitlistEntry, WaitlistStatus};
use crate::ports::WaitlistRepository;

use super::{col, db_err, json_col};

/// PostgreSQL implementation of WaitlistRepository.
#[derive(Clone)]
pub struct PostgresWaitlistRepository {
    pool: PgPool,
}

impl PostgresWaitlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    id, queue_id, commerce_id, date, channel, user_snapshot, client_id,
    status, processed, booking_id, created_at
"#;

#[async_trait]
impl WaitlistRepository for PostgresWaitlistRepository {
    async fn save(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO waitlist_entries (
                id, queue_id, commerce_id, date, channel, user_snapshot,
                client_id, status, processed, booking_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.queue_id.as_uuid())
        .bind(entry.commerce_id.as_uuid())
        .bind(entry.date.as_naive())
        .bind(&entry.channel)
        .bind(
            serde_json::to_value(&entry.user)
                .map_err(|e| db_err("Failed to serialize user snapshot", e))?,
        )
        .bind(entry.client_id.as_ref().map(|c| *c.as_uuid()))
        .bind(status_to_str(entry.status))
        .bind(entry.processed)
        .bind(entry.booking_id.as_ref().map(|b| *b.as_uuid()))
        .bind(entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert waitlist entry", e))?;

        Ok(())
    }

    async fn update(&self, entry: &WaitlistEntry) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_entries SET
                status = $2,
                processed = $3,
                booking_id = $4
            WHERE id = $1
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(status_to_str(entry.status))
        .bind(entry.processed)
        .bind(entry.booking_id.as_ref().map(|b| *b.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update waitlist entry", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::WaitlistEntryNotFound,
                format!("Waitlist entry not found: {}", entry.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &WaitlistEntryId,
    ) -> Result<Option<WaitlistEntry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM waitlist_entries WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch waitlist entry", e))?;

        row.map(row_to_entry).transpose()
    }

    async fn find_promotable(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<WaitlistEntry>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM waitlist_entries \
             WHERE queue_id = $1 AND date = $2 \
               AND status = 'pending' AND processed = FALSE AND booking_id IS NULL \
             ORDER BY created_at ASC"
        ))
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch promotable entries", e))?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

fn status_to_str(status: WaitlistStatus) -> &'static str {
    match status {
        WaitlistStatus::Pending => "pending",
        WaitlistStatus::Processed => "processed",
        WaitlistStatus::Cancelled => "cancelled",
    }
}

fn str_to_status(s: &str) -> Result<WaitlistStatus, DomainError> {
    match s {
        "pending" => Ok(WaitlistStatus::Pending),
        "processed" => Ok(WaitlistStatus::Processed),
        "cancelled" => Ok(WaitlistStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid waitlist status: {}", s),
        )),
    }
}

fn row_to_entry(row: PgRow) -> Result<WaitlistEntry, DomainError> {
    let status_str: String = col(&row, "status")?;
    let client_id: Option<uuid::Uuid> = col(&row, "client_id")?;
    let booking_id: Option<uuid::Uuid> = col(&row, "booking_id")?;

    Ok(WaitlistEntry {
        id: WaitlistEntryId::from_uuid(col(&row, "id")?),
        queue_id: QueueId::from_uuid(col(&row, "queue_id")?),
        commerce_id: CommerceId::from_uuid(col(&row, "commerce_id")?),
        date: DayDate::from_naive(col(&row, "date")?),
        channel: col(&row, "channel")?,
        user: json_col(&row, "user_snapshot")?,
        client_id: client_id.map(ClientId::from_uuid),
        status: str_to_status(&status_str)?,
        processed: col(&row, "processed")?,
        booking_id: booking_id.map(BookingId::from_uuid),
        created_at: Timestamp::from_datetime(col(&row, "created_at")?),
    })
}
