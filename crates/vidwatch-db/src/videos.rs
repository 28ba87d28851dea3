//! Database operations for the `videos` table.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use vidwatch_core::{NewVideo, VideoRecord, VideoStore};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `videos` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VideoRow {
    pub video_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub fetched_at: DateTime<Utc>,
}

impl From<VideoRow> for VideoRecord {
    fn from(row: VideoRow) -> Self {
        VideoRecord {
            video_id: row.video_id,
            title: row.title,
            description: row.description,
            published_at: row.published_at,
            view_count: row.view_count,
            like_count: row.like_count,
            comment_count: row.comment_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert or refresh a video row (keyed on `video_id`).
///
/// Re-fetching an existing video replaces its metadata and metrics and
/// bumps `fetched_at`, mirroring the upstream `INSERT OR REPLACE`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails.
pub async fn upsert_video(pool: &PgPool, video: &NewVideo) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO videos \
             (video_id, title, description, published_at, view_count, like_count, comment_count) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         ON CONFLICT (video_id) DO UPDATE SET \
             title = EXCLUDED.title, \
             description = EXCLUDED.description, \
             published_at = EXCLUDED.published_at, \
             view_count = EXCLUDED.view_count, \
             like_count = EXCLUDED.like_count, \
             comment_count = EXCLUDED.comment_count, \
             fetched_at = NOW()",
    )
    .bind(&video.video_id)
    .bind(&video.title)
    .bind(&video.description)
    .bind(video.published_at)
    .bind(video.view_count)
    .bind(video.like_count)
    .bind(video.comment_count)
    .execute(pool)
    .await?;

    Ok(())
}

/// List every video ordered ascending by publish time.
///
/// `video_id` is the tie-break for simultaneous publishes, so the
/// ordering the pipeline sees is fully deterministic.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_videos_chronological(pool: &PgPool) -> Result<Vec<VideoRecord>, DbError> {
    let rows = sqlx::query_as::<_, VideoRow>(
        "SELECT video_id, title, description, published_at, \
                view_count, like_count, comment_count, fetched_at \
         FROM videos \
         ORDER BY published_at ASC, video_id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(VideoRecord::from).collect())
}

/// Count persisted videos.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_videos(pool: &PgPool) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Publish timestamp of the most recent video, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_published_at(pool: &PgPool) -> Result<Option<DateTime<Utc>>, DbError> {
    let latest: Option<DateTime<Utc>> = sqlx::query_scalar("SELECT MAX(published_at) FROM videos")
        .fetch_one(pool)
        .await?;
    Ok(latest)
}

// ---------------------------------------------------------------------------
// Record store adapter
// ---------------------------------------------------------------------------

/// Postgres-backed implementation of the pipeline's record store.
#[derive(Debug, Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl VideoStore for PgVideoStore {
    type Error = DbError;

    fn fetch_all(&self) -> impl Future<Output = Result<Vec<VideoRecord>, DbError>> + Send {
        async move { list_videos_chronological(&self.pool).await }
    }
}
