//! PostgreSQL implementation of TakenBlockLedger.
//!
//! Exclusivity rests on the unique index over (queue_id, date, block_number).
//! `reserve` inserts inside one transaction, so two sessions racing for an
//! overlapping selection cannot both commit.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::booking::TakenBlockRecord;
use crate::domain::catalog::BlockSelection;
use crate::domain::foundation::{DayDate, DomainError, ErrorCode, QueueId, SessionKey};
use crate::ports::TakenBlockLedger;

use super::{col, db_err};

/// PostgreSQL implementation of TakenBlockLedger.
#[derive(Clone)]
pub struct PostgresTakenBlockLedger {
    pool: PgPool,
}

impl PostgresTakenBlockLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TakenBlockLedger for PostgresTakenBlockLedger {
    async fn find_taken(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        excluding_session: Option<&SessionKey>,
    ) -> Result<Vec<TakenBlockRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, queue_id, date, block_number, hour_from, hour_to, session_id
            FROM taken_blocks
            WHERE queue_id = $1 AND date = $2
              AND ($3::uuid IS NULL OR session_id <> $3)
            ORDER BY block_number ASC
            "#,
        )
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .bind(excluding_session.map(|s| *s.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch taken blocks", e))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn reserve(&self, records: &[TakenBlockRecord]) -> Result<(), DomainError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to begin reservation", e))?;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO taken_blocks (
                    id, queue_id, date, block_number, hour_from, hour_to, session_id
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(record.id)
            .bind(record.queue_id.as_uuid())
            .bind(record.date.as_naive())
            .bind(record.block_number as i32)
            .bind(&record.hour_from)
            .bind(&record.hour_to)
            .bind(record.session_id.as_uuid())
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                let taken = e
                    .as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false);
                tx.rollback()
                    .await
                    .map_err(|e| db_err("Failed to roll back reservation", e))?;
                if taken {
                    return Err(DomainError::new(
                        ErrorCode::SlotTaken,
                        format!(
                            "Block {} on {} is already taken",
                            record.block_number, record.date
                        ),
                    )
                    .with_detail("block_number", record.block_number.to_string()));
                }
                return Err(db_err("Failed to reserve blocks", e));
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_err("Failed to commit reservation", e))?;

        Ok(())
    }

    async fn release(
        &self,
        queue_id: &QueueId,
        date: &DayDate,
        selection: &BlockSelection,
    ) -> Result<(), DomainError> {
        let numbers: Vec<i32> = selection.numbers().into_iter().map(|n| n as i32).collect();

        let result = sqlx::query(
            "DELETE FROM taken_blocks \
             WHERE queue_id = $1 AND date = $2 AND block_number = ANY($3)",
        )
        .bind(queue_id.as_uuid())
        .bind(date.as_naive())
        .bind(&numbers)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to release blocks", e))?;

        if result.rows_affected() == 0 {
            debug!(
                queue_id = %queue_id,
                date = %date,
                "No ledger records matched the release"
            );
        }

        Ok(())
    }
}

fn row_to_record(row: PgRow) -> Result<TakenBlockRecord, DomainError> {
    let id: Uuid = col(&row, "id")?;
    let block_number: i32 = col(&row, "block_number")?;

    Ok(TakenBlockRecord {
        id,
        queue_id: QueueId::from_uuid(col(&row, "queue_id")?),
        date: DayDate::from_naive(col(&row, "date")?),
        block_number: block_number as u32,
        hour_from: col(&row, "hour_from")?,
        hour_to: col(&row, "hour_to")?,
        session_id: SessionKey::from_uuid(col(&row, "session_id")?),
    })
}
