//! The classifier service: short-circuits, truncation, and degradation.

use std::future::Future;

use crate::backend::{EmotionBackend, HttpModelClient, ToxicityBackend};
use crate::error::ClassifyError;
use crate::normalize::{is_negative, toxicity_from_scores, truncate_chars};
use crate::types::{ClassificationResult, ClassificationStatus};

/// Default input limit (chars) for the emotion model.
pub const DEFAULT_EMOTION_MAX_CHARS: usize = 2000;

/// Default input limit (chars) for the toxicity model.
pub const DEFAULT_TOXICITY_MAX_CHARS: usize = 512;

/// Configuration for the HTTP-backed classifier service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub emotion_url: String,
    pub toxicity_url: String,
    pub timeout_secs: u64,
    pub emotion_max_chars: usize,
    pub toxicity_max_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            emotion_url: "http://127.0.0.1:8090/models/emotion".to_string(),
            toxicity_url: "http://127.0.0.1:8090/models/toxicity".to_string(),
            timeout_secs: 30,
            emotion_max_chars: DEFAULT_EMOTION_MAX_CHARS,
            toxicity_max_chars: DEFAULT_TOXICITY_MAX_CHARS,
        }
    }
}

impl ClassifierConfig {
    /// Build classifier settings from the application configuration.
    #[must_use]
    pub fn from_app_config(config: &vidwatch_core::AppConfig) -> Self {
        Self {
            emotion_url: config.emotion_model_url.clone(),
            toxicity_url: config.toxicity_model_url.clone(),
            timeout_secs: config.classifier_timeout_secs,
            emotion_max_chars: config.emotion_max_chars,
            toxicity_max_chars: config.toxicity_max_chars,
        }
    }
}

/// The production classifier type: both models behind HTTP endpoints.
pub type HttpClassifier = Classifier<HttpModelClient, HttpModelClient>;

/// Content classifier with injected model backends.
///
/// Constructed once per process and passed by reference through pipeline
/// runs. Holds no mutable state, so concurrent per-record calls are safe.
pub struct Classifier<E, T> {
    emotion: E,
    toxicity: T,
    emotion_max_chars: usize,
    toxicity_max_chars: usize,
}

impl Classifier<HttpModelClient, HttpModelClient> {
    /// Build the production classifier from config.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if an HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        let emotion = HttpModelClient::new(&config.emotion_url, config.timeout_secs)?;
        let toxicity = HttpModelClient::new(&config.toxicity_url, config.timeout_secs)?;
        Ok(Classifier::new(emotion, toxicity)
            .with_limits(config.emotion_max_chars, config.toxicity_max_chars))
    }
}

impl<E, T> Classifier<E, T>
where
    E: EmotionBackend + Sync,
    T: ToxicityBackend + Sync,
{
    /// Create a classifier with the default input limits.
    pub fn new(emotion: E, toxicity: T) -> Self {
        Self {
            emotion,
            toxicity,
            emotion_max_chars: DEFAULT_EMOTION_MAX_CHARS,
            toxicity_max_chars: DEFAULT_TOXICITY_MAX_CHARS,
        }
    }

    /// Override the per-model input limits.
    #[must_use]
    pub fn with_limits(mut self, emotion_max_chars: usize, toxicity_max_chars: usize) -> Self {
        self.emotion_max_chars = emotion_max_chars;
        self.toxicity_max_chars = toxicity_max_chars;
        self
    }

    /// Classify one record's combined text.
    ///
    /// Empty or whitespace-only text short-circuits to [`ClassificationResult::empty`]
    /// without invoking either model. Input longer than a model's limit is
    /// silently truncated to a prefix before submission. A failure of
    /// either model degrades the record to [`ClassificationResult::degraded`];
    /// the error is logged, never propagated.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ClassificationResult::empty();
        }

        let emotion_input = truncate_chars(trimmed, self.emotion_max_chars);
        let emotions = match self.emotion.classify_emotions(emotion_input).await {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!(error = %e, "emotion model call failed — degrading record");
                return ClassificationResult::degraded();
            }
        };

        let toxicity_input = truncate_chars(trimmed, self.toxicity_max_chars);
        let toxicity_scores = match self.toxicity.score_toxicity(toxicity_input).await {
            Ok(scores) => scores,
            Err(e) => {
                tracing::warn!(error = %e, "toxicity model call failed — degrading record");
                return ClassificationResult::degraded();
            }
        };

        let negative = is_negative(&emotions);
        let toxicity = toxicity_from_scores(&toxicity_scores);

        ClassificationResult {
            emotions,
            toxicity,
            negative,
            status: ClassificationStatus::Scored,
        }
    }
}

/// Classification seam used by the analytics pipeline.
///
/// Implemented by [`Classifier`] in production and by deterministic
/// stubs in pipeline tests.
pub trait ClassifyContent: Sync {
    fn classify(&self, text: &str) -> impl Future<Output = ClassificationResult> + Send;
}

impl<E, T> ClassifyContent for Classifier<E, T>
where
    E: EmotionBackend + Send + Sync,
    T: ToxicityBackend + Send + Sync,
{
    fn classify(&self, text: &str) -> impl Future<Output = ClassificationResult> + Send {
        Classifier::classify(self, text)
    }
}
