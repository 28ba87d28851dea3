//! Weekly resampling and behavioral-risk alerting.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::AnalysisError;
use crate::types::{EnrichedVideo, WeeklyBucket};

/// Monday of the ISO week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

/// Partition classified records into ISO calendar weeks and flag weeks
/// where negative content is a strict majority (`2 * negative > count`;
/// ties do not alert).
///
/// Requires chronologically ascending input: window boundaries are only
/// meaningful over well-ordered timestamps, so out-of-order input
/// surfaces [`AnalysisError::OutOfOrder`] rather than a silently wrong
/// bucket. Weeks with no records produce no bucket and cannot alert.
/// Identical input always yields identical buckets.
pub fn aggregate_weekly(videos: &[EnrichedVideo]) -> Result<Vec<WeeklyBucket>, AnalysisError> {
    for pair in videos.windows(2) {
        if pair[1].record.published_at < pair[0].record.published_at {
            return Err(AnalysisError::OutOfOrder {
                video_id: pair[1].record.video_id.clone(),
            });
        }
    }

    let mut buckets: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for video in videos {
        let week = week_start(video.record.published_at.date_naive());
        let entry = buckets.entry(week).or_insert((0, 0));
        entry.0 += 1;
        if video.classification.negative {
            entry.1 += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let weekly = buckets
        .into_iter()
        .map(|(week_start, (video_count, negative_count))| WeeklyBucket {
            week_start,
            video_count,
            negative_count,
            negative_ratio: negative_count as f64 / video_count as f64,
            alert: 2 * negative_count > video_count,
        })
        .collect();

    Ok(weekly)
}
