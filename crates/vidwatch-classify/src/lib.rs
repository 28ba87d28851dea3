//! Text classification service for vidwatch.
//!
//! Scores each video's combined title+description against two external
//! models — an emotion classifier over a fixed label set and a toxicity
//! scorer — and derives the negative-sentiment flag the weekly alerting
//! depends on. The service is constructed once and passed by reference
//! into the pipeline; model backends sit behind traits so tests
//! substitute fakes.
//!
//! Failure policy: a model failure for one record degrades that record
//! to no-signal defaults (with a `Degraded` status) and never aborts the
//! batch. No retries — repeated calls against the same content are
//! assumed to fail for the same structural reason within one run.

mod backend;
mod classifier;
mod error;
mod normalize;
mod types;

pub use backend::{EmotionBackend, HttpModelClient, ToxicityBackend};
pub use classifier::{
    Classifier, ClassifierConfig, ClassifyContent, HttpClassifier, DEFAULT_EMOTION_MAX_CHARS,
    DEFAULT_TOXICITY_MAX_CHARS,
};
pub use error::ClassifyError;
pub use normalize::{is_negative, toxicity_from_scores, truncate_chars, ScorePayload};
pub use types::{ClassificationResult, ClassificationStatus, LabelScore};
