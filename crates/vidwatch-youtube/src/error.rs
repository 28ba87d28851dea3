use thiserror::Error;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API error: {0}")]
    ApiError(String),

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot find channel with handle {0}")]
    ChannelNotFound(String),

    #[error("channel {0} has no uploads playlist")]
    MissingUploadsPlaylist(String),
}
