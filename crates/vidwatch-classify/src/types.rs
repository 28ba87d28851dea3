use serde::{Deserialize, Serialize};

/// One (label, probability) pair from a classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// How a record's classification was produced.
///
/// Keeps "the models said nothing alarming" distinguishable from "the
/// models were never consulted" and "a model call failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStatus {
    /// Both models ran and returned usable scores.
    Scored,
    /// The record had no text; no model was invoked.
    Empty,
    /// A model call failed; scores fell back to no-signal defaults.
    Degraded,
}

/// Emotion distribution, toxicity score, and derived negative flag for
/// one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Emotion label distribution; probabilities in [0, 1].
    pub emotions: Vec<LabelScore>,
    /// Toxicity probability in [0, 1].
    pub toxicity: f64,
    /// True iff a negative emotion label scored strictly above 0.5.
    pub negative: bool,
    pub status: ClassificationStatus,
}

impl ClassificationResult {
    fn no_signal(status: ClassificationStatus) -> Self {
        Self {
            emotions: Vec::new(),
            toxicity: 0.0,
            negative: false,
            status,
        }
    }

    /// Defaults for a record with no text.
    #[must_use]
    pub fn empty() -> Self {
        Self::no_signal(ClassificationStatus::Empty)
    }

    /// Defaults for a record whose model call failed.
    #[must_use]
    pub fn degraded() -> Self {
        Self::no_signal(ClassificationStatus::Degraded)
    }
}
