//! Fetch command: pull channel videos from the YouTube API into the store.

use sqlx::PgPool;
use vidwatch_core::AppConfig;
use vidwatch_youtube::{fetch_channel_videos, YoutubeClient};

/// Run a fetch for the configured (or overridden) channel handle.
///
/// Resolves the handle, walks the uploads playlist, and upserts every
/// video. A fetch run tracks overall progress; per-video persistence
/// failures are logged and skipped.
///
/// When `dry_run` is `true`, resolves the channel and returns without
/// touching the database.
///
/// # Errors
///
/// Returns an error if no handle or API key is configured, the YouTube
/// API fails after retries, or every video fails to persist.
pub(crate) async fn run_fetch(
    pool: &PgPool,
    config: &AppConfig,
    handle_override: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let handle = handle_override
        .map(ToString::to_string)
        .or_else(|| config.youtube_channel_handle.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no channel handle: pass --handle or set YOUTUBE_CHANNEL_HANDLE")
        })?;

    let api_key = config
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is not set"))?;

    let client = YoutubeClient::new(api_key, config.youtube_request_timeout_secs)?
        .with_retry_policy(
            config.youtube_max_retries,
            config.youtube_retry_backoff_base_ms,
        );

    if dry_run {
        let channel_id = client.resolve_channel_id(&handle).await?;
        println!("dry-run: would fetch uploads for channel {channel_id} ({handle})");
        return Ok(());
    }

    let run = vidwatch_db::create_fetch_run(pool, "cli").await?;
    if let Err(e) = vidwatch_db::start_fetch_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, &format!("{e}")).await;
        return Err(e.into());
    }

    let videos = match fetch_channel_videos(&client, &handle).await {
        Ok(videos) => videos,
        Err(e) => {
            fail_run_best_effort(pool, run.id, &format!("{e}")).await;
            return Err(e.into());
        }
    };

    let mut stored: i32 = 0;
    let mut failed: usize = 0;

    for video in &videos {
        match vidwatch_db::upsert_video(pool, video).await {
            Ok(()) => stored = stored.saturating_add(1),
            Err(e) => {
                tracing::error!(video_id = %video.video_id, error = %e, "failed to upsert video");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total = videos.len(), "some videos failed to persist");
    }

    if failed == videos.len() && !videos.is_empty() {
        let message = format!("all {failed} videos failed to persist");
        fail_run_best_effort(pool, run.id, &message).await;
        anyhow::bail!("{message}");
    }

    if let Err(err) = vidwatch_db::complete_fetch_run(pool, run.id, stored).await {
        fail_run_best_effort(pool, run.id, &format!("{err}")).await;
        return Err(err.into());
    }

    println!("fetch complete: {stored} videos stored for {handle}");
    Ok(())
}

/// Mark a run failed, logging (not propagating) a bookkeeping failure.
async fn fail_run_best_effort(pool: &PgPool, run_id: i64, message: &str) {
    if let Err(e) = vidwatch_db::fail_fetch_run(pool, run_id, message).await {
        tracing::error!(run_id, error = %e, "failed to mark fetch run as failed");
    }
}
