//! PostgreSQL adapters - database implementations for the repository ports.
//!
//! All queries are runtime-checked `sqlx::query` calls; rows are mapped to
//! domain aggregates by hand. Complex value objects (contact snapshots,
//! block selections, booking kinds) are stored as jsonb.

mod booking_repository;
mod taken_block_ledger;
mod waitlist_repository;

pub use booking_repository::PostgresBookingRepository;
pub use taken_block_ledger::PostgresTakenBlockLedger;
pub use waitlist_repository::PostgresWaitlistRepository;

use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode};

pub(crate) fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Reads one typed column, mapping decode failures to `DatabaseError`.
pub(crate) fn col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| db_err(&format!("Failed to get column {}", name), e))
}

/// Reads a jsonb column into a domain value.
pub(crate) fn json_col<T: DeserializeOwned>(row: &PgRow, name: &str) -> Result<T, DomainError> {
    let value: serde_json::Value = col(row, name)?;
    serde_json::from_value(value)
        .map_err(|e| db_err(&format!("Failed to deserialize column {}", name), e))
}

/// Reads a nullable jsonb column into a domain value.
pub(crate) fn opt_json_col<T: DeserializeOwned>(
    row: &PgRow,
    name: &str,
) -> Result<Option<T>, DomainError> {
    let value: Option<serde_json::Value> = col(row, name)?;
    value
        .map(|v| {
            serde_json::from_value(v)
                .map_err(|e| db_err(&format!("Failed to deserialize column {}", name), e))
        })
        .transpose()
}
