//! Analyze command: run the full pipeline and print the results.

use chrono::Utc;
use sqlx::PgPool;
use vidwatch_analysis::{run_analysis, AnalysisOptions, AnalysisResult};
use vidwatch_classify::{ClassificationStatus, ClassifierConfig, HttpClassifier};
use vidwatch_core::AppConfig;
use vidwatch_db::PgVideoStore;

/// Run the analytics pipeline end-to-end and print a markdown report,
/// or the raw JSON bundle with `--json`.
///
/// Every invocation re-reads the store and re-classifies; there is no
/// cache between runs.
///
/// # Errors
///
/// Returns an error if the store is empty or unreadable, or if the
/// result cannot be serialized. Per-record classifier failures degrade
/// in place and do not fail the run.
pub(crate) async fn run_analyze(
    pool: &PgPool,
    config: &AppConfig,
    json: bool,
) -> anyhow::Result<()> {
    let store = PgVideoStore::new(pool.clone());
    let classifier = HttpClassifier::from_config(&ClassifierConfig::from_app_config(config))?;
    let options = AnalysisOptions {
        classify_concurrency: config.classify_concurrency,
    };

    let result = run_analysis(&store, &classifier, &options).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&result);
    Ok(())
}

fn print_report(result: &AnalysisResult) {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");
    let degraded = result
        .videos
        .iter()
        .filter(|v| v.classification.status == ClassificationStatus::Degraded)
        .count();

    println!("# Channel Analysis");
    println!();
    println!("**Generated**: {now}");
    println!("**Videos**: {}", result.videos.len());
    match result.best_hour {
        Some(hour) => println!("**Best posting hour**: {hour:02}:00 UTC"),
        None => println!("**Best posting hour**: unknown"),
    }
    if degraded > 0 {
        println!("**Degraded classifications**: {degraded}");
    }
    println!();

    println!("## Top hashtags");
    println!();
    if result.top_hashtags.is_empty() {
        println!("_No hashtags found._");
    } else {
        println!("| Tag | Count |");
        println!("|-----|-------|");
        for entry in &result.top_hashtags {
            println!("| #{} | {} |", entry.tag, entry.count);
        }
    }
    println!();

    println!("## Weekly negative-content alerts");
    println!();
    if result.alerts.is_empty() {
        println!("_No alert weeks._");
    } else {
        println!("| Week | Videos | Negative | Ratio |");
        println!("|------|--------|----------|-------|");
        for bucket in &result.alerts {
            println!(
                "| {} | {} | {} | {:.0}% |",
                bucket.week_start,
                bucket.video_count,
                bucket.negative_count,
                bucket.negative_ratio * 100.0
            );
        }
    }
}
