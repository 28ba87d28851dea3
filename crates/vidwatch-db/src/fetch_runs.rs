//! Database operations for the `fetch_runs` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `fetch_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FetchRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub trigger_source: String,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub records_processed: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creates a new fetch run in `queued` status.
///
/// Generates a UUID in Rust and binds it to `public_id`. Returns the full
/// newly-created row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert or fetch fails.
pub async fn create_fetch_run(pool: &PgPool, trigger_source: &str) -> Result<FetchRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, FetchRunRow>(
        "INSERT INTO fetch_runs (public_id, trigger_source, status) \
         VALUES ($1, $2, 'queued') \
         RETURNING id, public_id, trigger_source, status, \
                   started_at, completed_at, records_processed, error_message, created_at",
    )
    .bind(public_id)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the run does not exist in `queued`
/// status, or [`DbError::Sqlx`] if the update fails.
pub async fn start_fetch_run(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE fetch_runs \
         SET status = 'running', started_at = NOW() \
         WHERE id = $1 AND status = 'queued'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Marks a run as `completed` with its processed-record count.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the run does not exist in `running`
/// status, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_fetch_run(
    pool: &PgPool,
    id: i64,
    records_processed: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE fetch_runs \
         SET status = 'completed', completed_at = NOW(), records_processed = $2 \
         WHERE id = $1 AND status = 'running'",
    )
    .bind(id)
    .bind(records_processed)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Marks a run as `failed` and records the error message.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn fail_fetch_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE fetch_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $2 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(error_message)
    .execute(pool)
    .await?;

    Ok(())
}

/// The most recently created fetch run, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_fetch_run(pool: &PgPool) -> Result<Option<FetchRunRow>, DbError> {
    let row = sqlx::query_as::<_, FetchRunRow>(
        "SELECT id, public_id, trigger_source, status, \
                started_at, completed_at, records_processed, error_message, created_at \
         FROM fetch_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
