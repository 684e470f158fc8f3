//! PostgreSQL implementation of BookingRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, ClientId, CommerceId, DayDate, DomainError, ErrorCode, PackageId, QueueId,
    SessionKey, Timestamp,
};
use crate::ports::BookingRepository;

use super::{col, db_err, json_col, opt_json_col};

/// PostgreSQL implementation of BookingRepository.
///
/// Bookings are a row per aggregate; the contact snapshot, block selection,
/// service details and kind live in jsonb columns since they are read and
/// written whole.
#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    id, queue_id, commerce_id, date, number, status, channel, user_snapshot,
    client_id, block, services_id, services_details, package_id, kind,
    session_id, cancelled, cancelled_at, processed, processed_at,
    confirm_notified, created_at
"#;

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, queue_id, commerce_id, date, number, status, channel,
                user_snapshot, client_id, block, services_id, services_details,
                package_id, kind, session_id, cancelled, cancelled_at,
                processed, processed_at, confirm_notified, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21
            )
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.queue_id.as_uuid())
        .bind(booking.commerce_id.as_uuid())
        .bind(booking.date.as_naive())
        .bind(booking.number as i32)
        .bind(status_to_str(booking.status))
        .bind(&booking.channel)
        .bind(to_json("user_snapshot", &booking.user)?)
        .bind(booking.client_id.as_ref().map(|c| *c.as_uuid()))
        .bind(opt_to_json("block", booking.block.as_ref())?)
        .bind(to_json("services_id", &booking.services_id)?)
        .bind(to_json("services_details", &booking.services_details)?)
        .bind(booking.package_id.as_ref().map(|p| *p.as_uuid()))
        .bind(to_json("kind", &booking.kind)?)
        .bind(booking.session_id.as_uuid())
        .bind(booking.cancelled)
        .bind(booking.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(booking.processed)
        .bind(booking.processed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(booking.confirm_notified)
        .bind(booking.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert booking", e))?;

        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $2,
                package_id = $3,
                cancelled = $4,
                cancelled_at = $5,
                processed = $6,
                processed_at = $7,
                confirm_notified = $8
            WHERE id = $1
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(status_to_str(booking.status))
        .bind(booking.package_id.as_ref().map(|p| *p.as_uuid()))
        .bind(booking.cancelled)
        .bind(booking.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .bind(booking.processed)
        .bind(booking.processed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(booking.confirm_notified)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update booking", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch booking", e))?;

        row.map(row_to_booking).transpose()
    }

    async fn find_by_queue_and_date(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM bookings \
             WHERE queue_id = $1 AND date = $2 ORDER BY number ASC"
        ))
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch bookings for queue-day", e))?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn count_active_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings \
             WHERE queue_id = $1 AND date = $2 AND status IN ('pending', 'confirmed')",
        )
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to count active bookings", e))?;

        Ok(result.0 as u32)
    }

    async fn next_number_for_day(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
    ) -> Result<u32, DomainError> {
        let result: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(number), 0) + 1 FROM bookings \
             WHERE queue_id = $1 AND date = $2",
        )
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to compute next booking number", e))?;

        Ok(result.0 as u32)
    }

    async fn find_pending_between(
        &self,
        from: &DayDate,
        to: &DayDate,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM bookings \
             WHERE status = 'pending' AND date >= $1 AND date <= $2 \
             ORDER BY date ASC, number ASC"
        ))
        .bind(from.as_naive())
        .bind(to.as_naive())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch pending bookings", e))?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn find_unreminded_upcoming(
        &self,
        days_before: u32,
    ) -> Result<Vec<Booking>, DomainError> {
        let today = DayDate::today();
        let horizon = today.add_days(days_before as i64);

        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM bookings \
             WHERE status IN ('pending', 'confirmed') \
               AND confirm_notified = FALSE \
               AND date >= $1 AND date <= $2 \
             ORDER BY date ASC, number ASC"
        ))
        .bind(today.as_naive())
        .bind(horizon.as_naive())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch unreminded bookings", e))?;

        rows.into_iter().map(row_to_booking).collect()
    }
}

fn status_to_str(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Attended => "attended",
        BookingStatus::ReserveCancelled => "reserve_cancelled",
        BookingStatus::Expired => "expired",
    }
}

fn str_to_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "attended" => Ok(BookingStatus::Attended),
        "reserve_cancelled" => Ok(BookingStatus::ReserveCancelled),
        "expired" => Ok(BookingStatus::Expired),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid booking status: {}", s),
        )),
    }
}

fn to_json<T: serde::Serialize>(
    field: &str,
    value: &T,
) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| db_err(&format!("Failed to serialize {}", field), e))
}

fn opt_to_json<T: serde::Serialize>(
    field: &str,
    value: Option<&T>,
) -> Result<Option<serde_json::Value>, DomainError> {
    value.map(|v| to_json(field, v)).transpose()
}

fn row_to_booking(row: PgRow) -> Result<Booking, DomainError> {
    let status_str: String = col(&row, "status")?;
    let client_id: Option<uuid::Uuid> = col(&row, "client_id")?;
    let package_id: Option<uuid::Uuid> = col(&row, "package_id")?;
    let cancelled_at: Option<chrono::DateTime<chrono::Utc>> = col(&row, "cancelled_at")?;
    let processed_at: Option<chrono::DateTime<chrono::Utc>> = col(&row, "processed_at")?;
    let number: i32 = col(&row, "number")?;

    Ok(Booking {
        id: BookingId::from_uuid(col(&row, "id")?),
        queue_id: QueueId::from_uuid(col(&row, "queue_id")?),
        commerce_id: CommerceId::from_uuid(col(&row, "commerce_id")?),
        date: DayDate::from_naive(col(&row, "date")?),
        number: number as u32,
        status: str_to_status(&status_str)?,
        channel: col(&row, "channel")?,
        user: json_col(&row, "user_snapshot")?,
        client_id: client_id.map(ClientId::from_uuid),
        block: opt_json_col(&row, "block")?,
        services_id: json_col(&row, "services_id")?,
        services_details: json_col(&row, "services_details")?,
        package_id: package_id.map(PackageId::from_uuid),
        kind: json_col(&row, "kind")?,
        session_id: SessionKey::from_uuid(col(&row, "session_id")?),
        cancelled: col(&row, "cancelled")?,
        cancelled_at: cancelled_at.map(Timestamp::from_datetime),
        processed: col(&row, "processed")?,
        processed_at: processed_at.map(Timestamp::from_datetime),
        confirm_notified: col(&row, "confirm_notified")?,
        created_at: Timestamp::from_datetime(col(&row, "created_at")?),
    })
}
