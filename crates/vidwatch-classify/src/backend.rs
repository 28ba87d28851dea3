//! Model backends for emotion and toxicity scoring.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::error::ClassifyError;
use crate::normalize::ScorePayload;
use crate::types::LabelScore;

/// Emotion classification over a fixed label set.
pub trait EmotionBackend {
    /// Score `text` against the model's emotion labels.
    fn classify_emotions(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<LabelScore>, ClassifyError>> + Send;
}

/// Toxicity scoring as a label distribution.
pub trait ToxicityBackend {
    /// Score `text` against the model's toxicity labels.
    fn score_toxicity(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<LabelScore>, ClassifyError>> + Send;
}

/// HTTP client for one text-classification model endpoint.
///
/// Speaks the common inference-server shape: `POST {"inputs": text}`,
/// responding with a flat or singly-nested list of label/score pairs
/// (both shapes normalize via [`ScorePayload`]).
pub struct HttpModelClient {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct ModelRequest<'a> {
    inputs: &'a str,
}

impl HttpModelClient {
    /// Create a client for the given model endpoint.
    ///
    /// The timeout bounds each classification call; a slow model degrades
    /// only the record being scored.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    async fn request_scores(&self, text: &str) -> Result<Vec<LabelScore>, ClassifyError> {
        let request = ModelRequest { inputs: text };
        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(ClassifyError::Api(format!(
                "model endpoint {} returned status {}",
                self.url,
                response.status()
            )));
        }

        let payload: ScorePayload = response.json().await?;
        Ok(payload.into_flat())
    }
}

impl EmotionBackend for HttpModelClient {
    fn classify_emotions(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<LabelScore>, ClassifyError>> + Send {
        self.request_scores(text)
    }
}

impl ToxicityBackend for HttpModelClient {
    fn score_toxicity(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<LabelScore>, ClassifyError>> + Send {
        self.request_scores(text)
    }
}
