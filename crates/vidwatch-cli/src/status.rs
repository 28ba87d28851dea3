//! Status command: store contents and latest fetch run.

use sqlx::PgPool;

/// Print a short status summary of the store and fetcher.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub(crate) async fn run_status(pool: &PgPool) -> anyhow::Result<()> {
    let count = vidwatch_db::count_videos(pool).await?;
    let latest = vidwatch_db::latest_published_at(pool).await?;
    let run = vidwatch_db::latest_fetch_run(pool).await?;

    println!("videos stored:  {count}");
    match latest {
        Some(ts) => println!("latest publish: {}", ts.format("%Y-%m-%d %H:%M UTC")),
        None => println!("latest publish: -"),
    }
    match run {
        Some(run) => {
            println!(
                "last fetch run: {} ({}, {} records)",
                run.status,
                run.created_at.format("%Y-%m-%d %H:%M UTC"),
                run.records_processed
            );
            if let Some(err) = run.error_message {
                println!("  error: {err}");
            }
        }
        None => println!("last fetch run: none — run `vidwatch-cli fetch` first"),
    }

    Ok(())
}
