use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint error: {0}")]
    Api(String),
}
