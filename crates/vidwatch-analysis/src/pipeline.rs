//! End-to-end orchestration of the analytics pipeline.

use futures::stream::{self, StreamExt};
use vidwatch_classify::{ClassificationStatus, ClassifyContent};
use vidwatch_core::{VideoRecord, VideoStore};

use crate::engagement::{best_hour, compute_growth};
use crate::error::AnalysisError;
use crate::hashtags::extract_hashtags;
use crate::types::{AnalysisResult, EnrichedVideo};
use crate::weekly::aggregate_weekly;

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Maximum concurrent classifier calls. Classification is
    /// independent per record, so calls overlap; results come back in
    /// record order regardless.
    pub classify_concurrency: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            classify_concurrency: 4,
        }
    }
}

/// Run the full pipeline against the record store.
///
/// Reads the complete record set, derives engagement metrics and the
/// hashtag ranking, classifies every record, aggregates weekly alert
/// buckets, and assembles the result bundle. Nothing is cached between
/// runs: every invocation re-reads the store and re-classifies.
///
/// # Errors
///
/// - [`AnalysisError::Store`] if the store cannot be read.
/// - [`AnalysisError::EmptyDataset`] if the store holds no records.
/// - [`AnalysisError::OutOfOrder`] if records reach the aggregator out
///   of chronological order.
pub async fn run_analysis<S, C>(
    store: &S,
    classifier: &C,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError>
where
    S: VideoStore,
    C: ClassifyContent,
{
    let records = store
        .fetch_all()
        .await
        .map_err(|e| AnalysisError::Store(Box::new(e)))?;
    analyze_records(records, classifier, options).await
}

/// Run the pipeline over an already-loaded record set.
///
/// Records must be sorted ascending by publish time (the store
/// contract; see [`VideoStore::fetch_all`]).
///
/// # Errors
///
/// Same as [`run_analysis`], minus the store read.
pub async fn analyze_records<C>(
    records: Vec<VideoRecord>,
    classifier: &C,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, AnalysisError>
where
    C: ClassifyContent,
{
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    tracing::info!(records = records.len(), "starting analysis run");

    let engagement = compute_growth(&records);
    let best_hour = best_hour(&records);
    let top_hashtags =
        extract_hashtags(records.iter().map(|r| r.description.as_deref().unwrap_or("")));

    let concurrency = options.classify_concurrency.max(1);
    let texts: Vec<String> = records.iter().map(VideoRecord::combined_text).collect();
    let classifications: Vec<_> = stream::iter(texts)
        .map(|text| async move { classifier.classify(&text).await })
        .buffered(concurrency)
        .collect()
        .await;

    let degraded = classifications
        .iter()
        .filter(|c| c.status == ClassificationStatus::Degraded)
        .count();
    if degraded > 0 {
        tracing::warn!(degraded, "records fell back to default classification");
    }

    let videos: Vec<EnrichedVideo> = records
        .into_iter()
        .zip(engagement)
        .zip(classifications)
        .map(|((record, engagement), classification)| EnrichedVideo {
            record,
            engagement,
            classification,
        })
        .collect();

    let weekly = aggregate_weekly(&videos)?;
    let alerts: Vec<_> = weekly.iter().filter(|b| b.alert).cloned().collect();

    tracing::info!(
        weeks = weekly.len(),
        alerts = alerts.len(),
        "analysis run complete"
    );

    Ok(AnalysisResult {
        best_hour,
        top_hashtags,
        weekly,
        alerts,
        videos,
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use super::*;
    use chrono::{TimeZone, Utc};
    use vidwatch_classify::{ClassificationResult, LabelScore};

    /// Deterministic classifier stub keyed on text content.
    ///
    /// Texts containing "gloomy" score as strongly negative; texts
    /// containing "broken" simulate a degraded model call; everything
    /// else scores as joy.
    struct KeywordClassifier;

    impl ClassifyContent for KeywordClassifier {
        fn classify(&self, text: &str) -> impl Future<Output = ClassificationResult> + Send {
            let trimmed = text.trim();
            let result = if trimmed.is_empty() {
                ClassificationResult::empty()
            } else if trimmed.contains("broken") {
                ClassificationResult::degraded()
            } else if trimmed.contains("gloomy") {
                ClassificationResult {
                    emotions: vec![LabelScore {
                        label: "sadness".to_string(),
                        score: 0.9,
                    }],
                    toxicity: 0.1,
                    negative: true,
                    status: ClassificationStatus::Scored,
                }
            } else {
                ClassificationResult {
                    emotions: vec![LabelScore {
                        label: "joy".to_string(),
                        score: 0.8,
                    }],
                    toxicity: 0.05,
                    negative: false,
                    status: ClassificationStatus::Scored,
                }
            };
            std::future::ready(result)
        }
    }

    struct FixedStore(Vec<VideoRecord>);

    impl VideoStore for FixedStore {
        type Error = std::convert::Infallible;

        fn fetch_all(
            &self,
        ) -> impl Future<Output = Result<Vec<VideoRecord>, Self::Error>> + Send {
            std::future::ready(Ok(self.0.clone()))
        }
    }

    struct BrokenStore;

    impl VideoStore for BrokenStore {
        type Error = std::io::Error;

        fn fetch_all(
            &self,
        ) -> impl Future<Output = Result<Vec<VideoRecord>, Self::Error>> + Send {
            std::future::ready(Err(std::io::Error::other("connection refused")))
        }
    }

    fn record(id: &str, day: u32, hour: u32, title: &str, views: i64) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: Some(title.to_string()),
            description: Some(format!("{title} #daily")),
            published_at: Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap(),
            view_count: views,
            like_count: views / 10,
            comment_count: views / 20,
        }
    }

    fn sample_records() -> Vec<VideoRecord> {
        vec![
            // Week of June 2: three gloomy out of four → alert.
            record("a", 2, 14, "gloomy monday", 100),
            record("b", 3, 14, "gloomy tuesday", 150),
            record("c", 4, 14, "gloomy again", 130),
            record("d", 5, 9, "a bright spot", 90),
            // Week of June 9: all upbeat → no alert.
            record("e", 10, 14, "sunny", 300),
            record("f", 11, 14, "cheerful", 280),
        ]
    }

    #[tokio::test]
    async fn empty_store_is_an_input_error() {
        let store = FixedStore(Vec::new());
        let result = run_analysis(&store, &KeywordClassifier, &AnalysisOptions::default()).await;
        assert!(matches!(result, Err(AnalysisError::EmptyDataset)));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let result =
            run_analysis(&BrokenStore, &KeywordClassifier, &AnalysisOptions::default()).await;
        assert!(matches!(result, Err(AnalysisError::Store(_))));
    }

    #[tokio::test]
    async fn full_run_assembles_all_artifacts() {
        let store = FixedStore(sample_records());
        let result = run_analysis(&store, &KeywordClassifier, &AnalysisOptions::default())
            .await
            .expect("run should succeed");

        assert_eq!(result.videos.len(), 6);
        assert_eq!(result.best_hour, Some(14));
        assert_eq!(result.top_hashtags[0].tag, "daily");
        assert_eq!(result.top_hashtags[0].count, 6);

        assert_eq!(result.weekly.len(), 2);
        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.alerts[0].video_count, 4);
        assert_eq!(result.alerts[0].negative_count, 3);

        // Growth is None on the first record and a delta afterwards.
        assert!(result.videos[0].engagement.view_growth.is_none());
        assert_eq!(result.videos[1].engagement.view_growth, Some(50));

        // Classification flowed into the enriched rows in record order.
        assert!(result.videos[0].classification.negative);
        assert!(!result.videos[3].classification.negative);
    }

    #[tokio::test]
    async fn failing_record_degrades_alone() {
        let mut records = sample_records();
        records[4] = record("e", 10, 14, "broken feed", 300);

        let store = FixedStore(records);
        let result = run_analysis(&store, &KeywordClassifier, &AnalysisOptions::default())
            .await
            .expect("degraded record must not fail the run");

        let statuses: Vec<_> = result
            .videos
            .iter()
            .map(|v| v.classification.status)
            .collect();
        assert_eq!(
            statuses.iter().filter(|s| **s == ClassificationStatus::Degraded).count(),
            1
        );
        assert_eq!(
            statuses.iter().filter(|s| **s == ClassificationStatus::Scored).count(),
            5
        );
        assert_eq!(result.videos[4].classification.status, ClassificationStatus::Degraded);
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let store = FixedStore(sample_records());
        let options = AnalysisOptions::default();

        let first = run_analysis(&store, &KeywordClassifier, &options)
            .await
            .unwrap();
        let second = run_analysis(&store, &KeywordClassifier, &options)
            .await
            .unwrap();

        assert_eq!(first, second);
        // Byte-identical once serialized, too.
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn concurrency_does_not_reorder_results() {
        let store = FixedStore(sample_records());
        let serial = AnalysisOptions {
            classify_concurrency: 1,
        };
        let parallel = AnalysisOptions {
            classify_concurrency: 8,
        };

        let a = run_analysis(&store, &KeywordClassifier, &serial).await.unwrap();
        let b = run_analysis(&store, &KeywordClassifier, &parallel)
            .await
            .unwrap();
        assert_eq!(a, b);
    }
}
