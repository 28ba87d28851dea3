//! HTTP client for the YouTube Data API v3.
//!
//! Resolves a channel handle to a channel ID, walks the channel's uploads
//! playlist page by page, and joins statistics fetched in chunks of 50.
//! Transient failures (timeouts, 5xx) are retried with exponential
//! back-off; API-level errors are surfaced as [`YoutubeError::ApiError`].

mod client;
mod error;
mod retry;
pub mod types;

pub use client::{fetch_channel_videos, YoutubeClient};
pub use error::YoutubeError;
