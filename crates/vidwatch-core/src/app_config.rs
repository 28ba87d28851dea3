use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YouTube Data API key. Optional: only the fetcher requires it.
    pub youtube_api_key: Option<String>,
    /// Channel handle to fetch (e.g. `@somechannel`). Optional: the CLI
    /// accepts `--handle` as an override.
    pub youtube_channel_handle: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub youtube_request_timeout_secs: u64,
    pub youtube_max_retries: u32,
    pub youtube_retry_backoff_base_ms: u64,
    /// Endpoint of the emotion classification model.
    pub emotion_model_url: String,
    /// Endpoint of the toxicity scoring model.
    pub toxicity_model_url: String,
    pub classifier_timeout_secs: u64,
    /// Maximum number of concurrent classifier calls per pipeline run.
    pub classify_concurrency: usize,
    /// Longest text (in chars) submitted to the emotion model.
    pub emotion_max_chars: usize,
    /// Longest text (in chars) submitted to the toxicity model.
    pub toxicity_max_chars: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_channel_handle", &self.youtube_channel_handle)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "youtube_request_timeout_secs",
                &self.youtube_request_timeout_secs,
            )
            .field("youtube_max_retries", &self.youtube_max_retries)
            .field(
                "youtube_retry_backoff_base_ms",
                &self.youtube_retry_backoff_base_ms,
            )
            .field("emotion_model_url", &self.emotion_model_url)
            .field("toxicity_model_url", &self.toxicity_model_url)
            .field("classifier_timeout_secs", &self.classifier_timeout_secs)
            .field("classify_concurrency", &self.classify_concurrency)
            .field("emotion_max_chars", &self.emotion_max_chars)
            .field("toxicity_max_chars", &self.toxicity_max_chars)
            .finish()
    }
}
