use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The store returned no records; there is nothing to derive.
    #[error("record store is empty — fetch videos before analyzing")]
    EmptyDataset,

    /// Records reached the aggregator out of chronological order.
    /// Window boundaries are only meaningful over well-ordered
    /// timestamps, so this aborts the run.
    #[error("records out of chronological order at video {video_id}")]
    OutOfOrder { video_id: String },

    /// The record store could not be read.
    #[error("record store read failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}
