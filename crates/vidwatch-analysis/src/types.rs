use chrono::NaiveDate;
use serde::Serialize;
use vidwatch_classify::ClassificationResult;
use vidwatch_core::VideoRecord;

/// Per-record growth and rate metrics.
///
/// Computed once per pipeline run from the ordered record sequence;
/// never persisted, always recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementDerived {
    /// Signed view delta vs. the chronologically previous record;
    /// `None` for the first record, which has no prior value.
    pub view_growth: Option<i64>,
    pub like_growth: Option<i64>,
    pub comment_growth: Option<i64>,
    /// (likes + comments) / views; `None` when the record has no views.
    pub engagement_rate: Option<f64>,
}

/// A video joined with everything the pipeline derived for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedVideo {
    #[serde(flatten)]
    pub record: VideoRecord,
    #[serde(flatten)]
    pub engagement: EngagementDerived,
    pub classification: ClassificationResult,
}

/// One hashtag and its occurrence count across all descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashtagEntry {
    pub tag: String,
    pub count: usize,
}

/// One ISO calendar week of channel activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    /// Monday of the ISO week.
    pub week_start: NaiveDate,
    pub video_count: usize,
    pub negative_count: usize,
    /// `negative_count / video_count`; buckets are never empty.
    pub negative_ratio: f64,
    /// True when negative content is a strict majority of the week.
    pub alert: bool,
}

/// The terminal, immutable bundle of one pipeline run.
///
/// Owned by the caller after assembly; no pipeline component keeps a
/// reference once it is returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Hour of day (0–23, UTC) with the highest mean view count;
    /// `None` when there is no data.
    pub best_hour: Option<u32>,
    pub top_hashtags: Vec<HashtagEntry>,
    /// All non-empty weekly buckets, ascending by week.
    pub weekly: Vec<WeeklyBucket>,
    /// The subset of `weekly` that crossed the alert threshold.
    pub alerts: Vec<WeeklyBucket>,
    pub videos: Vec<EnrichedVideo>,
}
