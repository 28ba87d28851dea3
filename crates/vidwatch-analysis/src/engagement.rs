//! Per-video growth and rate metrics and the best posting hour.

use chrono::Timelike;
use vidwatch_core::VideoRecord;

use crate::types::EngagementDerived;

/// Derive growth deltas and engagement rates for a chronologically
/// ascending record sequence.
///
/// Sorting is the caller's contract: deltas over unsorted input are
/// meaningless, not an error. The first record has no predecessor and
/// gets `None` growth on every metric — representable distinct from a
/// zero delta.
#[must_use]
pub fn compute_growth(records: &[VideoRecord]) -> Vec<EngagementDerived> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let previous = i.checked_sub(1).map(|p| &records[p]);
            EngagementDerived {
                view_growth: previous.map(|p| record.view_count - p.view_count),
                like_growth: previous.map(|p| record.like_count - p.like_count),
                comment_growth: previous.map(|p| record.comment_count - p.comment_count),
                engagement_rate: engagement_rate(record),
            }
        })
        .collect()
}

/// `(likes + comments) / views`, or `None` for a record with no views.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(record: &VideoRecord) -> Option<f64> {
    if record.view_count == 0 {
        return None;
    }
    Some((record.like_count + record.comment_count) as f64 / record.view_count as f64)
}

/// Hour of day (UTC) with the highest mean view count.
///
/// Ties resolve to the lowest-numbered hour; an empty sequence has no
/// best hour.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn best_hour(records: &[VideoRecord]) -> Option<u32> {
    // (view sum, record count) per hour of day.
    let mut hours = [(0i64, 0u32); 24];
    for record in records {
        let hour = record.published_at.hour() as usize;
        hours[hour].0 += record.view_count;
        hours[hour].1 += 1;
    }

    let mut best: Option<(u32, f64)> = None;
    for (hour, &(sum, count)) in hours.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let mean = sum as f64 / f64::from(count);
        // Strict comparison keeps the earlier (lower) hour on ties.
        if best.is_none_or(|(_, best_mean)| mean > best_mean) {
            best = Some((hour as u32, mean));
        }
    }

    best.map(|(hour, _)| hour)
}
