use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single channel video with its metrics, as persisted in the store.
///
/// Immutable once fetched: the analytics pipeline reads records, it never
/// mutates them. `published_at` is the sort and partition key for all
/// derived time-series metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

impl VideoRecord {
    /// Title and description joined for text classification.
    ///
    /// Absent fields contribute an empty string, so a record with neither
    /// yields whitespace only (which the classifier treats as empty).
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// A freshly fetched video, not yet persisted.
///
/// Produced by the YouTube fetcher and consumed by the store's upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVideo {
    pub video_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}
