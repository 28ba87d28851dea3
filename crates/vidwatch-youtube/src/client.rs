//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with YouTube-specific error handling, API key
//! management, and typed response deserialization. Non-2xx responses
//! carrying the API's JSON error envelope are surfaced as
//! [`YoutubeError::ApiError`]; 5xx responses stay HTTP errors so the
//! retry layer treats them as transient.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};
use vidwatch_core::NewVideo;

use crate::error::YoutubeError;
use crate::retry::retry_with_backoff;
use crate::types::{
    ChannelListResponse, PlaylistItem, PlaylistItemsResponse, SearchResponse, VideoListResponse,
    VideoStatistics,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Page size for playlistItems and chunk size for the videos endpoint —
/// both are the API's maximum.
const PAGE_SIZE: usize = 50;

/// Upper bound on playlist pages walked in one run (50 videos each).
const MAX_PAGES: usize = 200;

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, and base URL. Use [`YoutubeClient::new`]
/// for production or [`YoutubeClient::with_base_url`] to point at a mock
/// server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production YouTube API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vidwatch/0.1 (channel-analytics)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends endpoint names rather than replacing the last path
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Override the retry policy (defaults: 3 retries, 1 s base back-off).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Resolves a channel handle (e.g. `@somechannel`) to a channel ID via
    /// the `search` endpoint, taking the first channel match.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ChannelNotFound`] if the search returns no items.
    /// - [`YoutubeError::ApiError`] / [`YoutubeError::Http`] /
    ///   [`YoutubeError::Deserialize`] on transport or response failures.
    pub async fn resolve_channel_id(&self, handle: &str) -> Result<String, YoutubeError> {
        let url = self.build_url(
            "search",
            &[
                ("q", handle),
                ("type", "channel"),
                ("part", "snippet"),
                ("maxResults", "1"),
            ],
        )?;
        let body = self.request_json(&url).await?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("search(q={handle})"),
                source: e,
            })?;

        response
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet.channel_id)
            .ok_or_else(|| YoutubeError::ChannelNotFound(handle.to_owned()))
    }

    /// Looks up the channel's uploads playlist ID via the `channels` endpoint.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingUploadsPlaylist`] if the channel exists but
    ///   exposes no uploads playlist.
    /// - [`YoutubeError::ApiError`] / [`YoutubeError::Http`] /
    ///   [`YoutubeError::Deserialize`] on transport or response failures.
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String, YoutubeError> {
        let url = self.build_url("channels", &[("part", "contentDetails"), ("id", channel_id)])?;
        let body = self.request_json(&url).await?;

        let response: ChannelListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("channels(id={channel_id})"),
                source: e,
            })?;

        response
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|details| details.related_playlists.uploads)
            .ok_or_else(|| YoutubeError::MissingUploadsPlaylist(channel_id.to_owned()))
    }

    /// Walks the uploads playlist page by page (50 items per page),
    /// following `nextPageToken` until exhaustion or [`MAX_PAGES`].
    ///
    /// # Errors
    ///
    /// Returns the first transport, API, or deserialization error hit while
    /// paginating.
    pub async fn list_playlist_videos(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, YoutubeError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        for page in 0..MAX_PAGES {
            let max_results = PAGE_SIZE.to_string();
            let mut params = vec![
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let url = self.build_url("playlistItems", &params)?;
            let body = self.request_json(&url).await?;

            let response: PlaylistItemsResponse =
                serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                    context: format!("playlistItems(playlistId={playlist_id}, page={page})"),
                    source: e,
                })?;

            items.extend(response.items);

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => return Ok(items),
            }
        }

        tracing::warn!(
            playlist_id,
            pages = MAX_PAGES,
            collected = items.len(),
            "stopped paginating at page cap"
        );
        Ok(items)
    }

    /// Fetches statistics for the given video IDs, batched in chunks of 50.
    ///
    /// Returns a map from video ID to its statistics; videos absent from
    /// the response are simply missing from the map.
    ///
    /// # Errors
    ///
    /// Returns the first transport, API, or deserialization error hit while
    /// batching.
    pub async fn fetch_statistics(
        &self,
        video_ids: &[String],
    ) -> Result<HashMap<String, VideoStatistics>, YoutubeError> {
        let mut stats = HashMap::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(PAGE_SIZE) {
            let ids = chunk.join(",");
            let url = self.build_url("videos", &[("part", "statistics"), ("id", &ids)])?;
            let body = self.request_json(&url).await?;

            let response: VideoListResponse =
                serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                    context: format!("videos(id={ids})"),
                    source: e,
                })?;

            for item in response.items {
                stats.insert(item.id, item.statistics.unwrap_or_default());
            }
        }

        Ok(stats)
    }

    /// Builds the full request URL with properly percent-encoded query parameters.
    fn build_url(&self, op: &str, extra: &[(&str, &str)]) -> Result<Url, YoutubeError> {
        let mut url = self
            .base_url
            .join(op)
            .map_err(|e| YoutubeError::ApiError(format!("invalid endpoint '{op}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request (with retry on transient failures) and parses the
    /// response body as JSON.
    ///
    /// 5xx responses surface as [`YoutubeError::Http`] so the retry layer
    /// sees them as transient; other non-2xx responses are decoded into the
    /// API's `{"error": {"message": …}}` envelope and surface as
    /// [`YoutubeError::ApiError`].
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if status.is_server_error() {
                    // Propagate as a reqwest status error; unreachable fallthrough.
                    response.error_for_status()?;
                    return Err(YoutubeError::ApiError(format!("HTTP {status}")));
                }

                let body = response.text().await?;

                if !status.is_success() {
                    let message = serde_json::from_str::<serde_json::Value>(&body)
                        .ok()
                        .and_then(|v| {
                            v.get("error")
                                .and_then(|e| e.get("message"))
                                .and_then(serde_json::Value::as_str)
                                .map(ToString::to_string)
                        })
                        .unwrap_or_else(|| format!("HTTP {status}"));
                    return Err(YoutubeError::ApiError(message));
                }

                serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
                    context: url.to_string(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Fetch the full video set for a channel handle.
///
/// Resolves the handle, walks the uploads playlist, joins statistics, and
/// returns one [`NewVideo`] per playlist entry. Entries without a publish
/// timestamp are skipped with a warning — every downstream derivation
/// partitions on publish time. Entries without statistics keep zero counts,
/// as in the upstream fetcher.
///
/// # Errors
///
/// Returns [`YoutubeError`] if any API call fails after retries.
pub async fn fetch_channel_videos(
    client: &YoutubeClient,
    handle: &str,
) -> Result<Vec<NewVideo>, YoutubeError> {
    let channel_id = client.resolve_channel_id(handle).await?;
    tracing::info!(handle, channel_id = %channel_id, "resolved channel");

    let playlist_id = client.uploads_playlist_id(&channel_id).await?;
    let items = client.list_playlist_videos(&playlist_id).await?;
    tracing::info!(count = items.len(), "enumerated uploads playlist");

    let video_ids: Vec<String> = items
        .iter()
        .map(|item| item.snippet.resource_id.video_id.clone())
        .collect();
    let stats = client.fetch_statistics(&video_ids).await?;

    let mut videos = Vec::with_capacity(items.len());
    let mut skipped = 0usize;

    for item in items {
        let snippet = item.snippet;
        let video_id = snippet.resource_id.video_id;

        let Some(published_at) = snippet.published_at else {
            skipped += 1;
            tracing::warn!(video_id = %video_id, "skipping video without publish timestamp");
            continue;
        };

        let video_stats = stats.get(&video_id).cloned().unwrap_or_default();
        videos.push(NewVideo {
            video_id,
            title: snippet.title,
            description: snippet.description,
            published_at,
            view_count: video_stats.views(),
            like_count: video_stats.likes(),
            comment_count: video_stats.comments(),
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "videos dropped for missing publish timestamp");
    }

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client
            .build_url("channels", &[("part", "contentDetails"), ("id", "UC123")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/channels?key=test-key&part=contentDetails&id=UC123"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://www.googleapis.com/youtube/v3/");
        let url = client.build_url("search", &[("q", "@handle")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/search?key=test-key&q=%40handle"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("search", &[("q", "cats & dogs")]).unwrap();
        assert!(
            url.as_str().contains("cats+%26+dogs") || url.as_str().contains("cats%20%26%20dogs"),
            "query param should be percent-encoded: {url}"
        );
    }
}
