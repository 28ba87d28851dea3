//! Analytics and signal-detection pipeline for vidwatch.
//!
//! Transforms the persisted per-video records into derived time-series
//! metrics (growth deltas, engagement rates, best posting hour), hashtag
//! rankings, per-record content classifications, and weekly
//! behavioral-risk alerts, assembled into one immutable
//! [`AnalysisResult`] per run.
//!
//! Every stage is a pure transformation producing new typed values;
//! nothing mutates the record store and nothing is cached between runs.

mod engagement;
mod error;
mod hashtags;
mod pipeline;
mod types;
mod weekly;

pub use engagement::{best_hour, compute_growth, engagement_rate};
pub use error::AnalysisError;
pub use hashtags::extract_hashtags;
pub use pipeline::{analyze_records, run_analysis, AnalysisOptions};
pub use types::{AnalysisResult, EngagementDerived, EnrichedVideo, HashtagEntry, WeeklyBucket};
pub use weekly::aggregate_weekly;
