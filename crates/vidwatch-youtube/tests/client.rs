//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use vidwatch_youtube::{fetch_channel_videos, YoutubeClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
        .with_retry_policy(0, 0)
}

#[tokio::test]
async fn resolve_channel_id_returns_first_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            { "snippet": { "channelId": "UCabc" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "@somechannel"))
        .and(query_param("type", "channel"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client
        .resolve_channel_id("@somechannel")
        .await
        .expect("should resolve channel");

    assert_eq!(id, "UCabc");
}

#[tokio::test]
async fn resolve_channel_id_with_no_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve_channel_id("@missing").await;

    let err = result.expect_err("should fail for unknown handle");
    assert!(
        err.to_string().contains("@missing"),
        "error should name the handle: {err}"
    );
}

#[tokio::test]
async fn uploads_playlist_id_reads_content_details() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "contentDetails": {
                    "relatedPlaylists": { "uploads": "UUabc" }
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "contentDetails"))
        .and(query_param("id", "UCabc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let playlist = client
        .uploads_playlist_id("UCabc")
        .await
        .expect("should find uploads playlist");

    assert_eq!(playlist, "UUabc");
}

#[tokio::test]
async fn list_playlist_videos_follows_next_page_token() {
    let server = MockServer::start().await;

    let page1 = serde_json::json!({
        "items": [
            {
                "snippet": {
                    "resourceId": { "videoId": "vid1" },
                    "title": "First",
                    "description": "",
                    "publishedAt": "2025-01-01T10:00:00Z"
                }
            }
        ],
        "nextPageToken": "page-2"
    });
    let page2 = serde_json::json!({
        "items": [
            {
                "snippet": {
                    "resourceId": { "videoId": "vid2" },
                    "title": "Second",
                    "description": "",
                    "publishedAt": "2025-01-08T10:00:00Z"
                }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page2))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UUabc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .list_playlist_videos("UUabc")
        .await
        .expect("should paginate");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].snippet.resource_id.video_id, "vid1");
    assert_eq!(items[1].snippet.resource_id.video_id, "vid2");
}

#[tokio::test]
async fn fetch_statistics_parses_string_counters() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "vid1",
                "statistics": {
                    "viewCount": "1000",
                    "likeCount": "50",
                    "commentCount": "7"
                }
            },
            {
                "id": "vid2",
                "statistics": { "viewCount": "20" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stats = client
        .fetch_statistics(&["vid1".to_string(), "vid2".to_string()])
        .await
        .expect("should fetch statistics");

    assert_eq!(stats.len(), 2);
    assert_eq!(stats["vid1"].views(), 1000);
    assert_eq!(stats["vid1"].likes(), 50);
    assert_eq!(stats["vid2"].views(), 20);
    assert_eq!(stats["vid2"].likes(), 0, "hidden like count defaults to 0");
}

#[tokio::test]
async fn api_error_body_surfaces_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota."
        }
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.resolve_channel_id("@whoever").await;

    let err = result.expect_err("quota error should surface");
    assert!(
        err.to_string().contains("exceeded your quota"),
        "expected quota message, got: {err}"
    );
}

#[tokio::test]
async fn fetch_channel_videos_joins_snippets_and_statistics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [ { "snippet": { "channelId": "UCabc" } } ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "contentDetails": { "relatedPlaylists": { "uploads": "UUabc" } } }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {
                    "snippet": {
                        "resourceId": { "videoId": "vid1" },
                        "title": "Kept",
                        "description": "with #tags",
                        "publishedAt": "2025-02-01T08:00:00Z"
                    }
                },
                {
                    "snippet": {
                        "resourceId": { "videoId": "vid2" },
                        "title": "No timestamp"
                    }
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {
                    "id": "vid1",
                    "statistics": { "viewCount": "500", "likeCount": "25", "commentCount": "5" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = fetch_channel_videos(&client, "@somechannel")
        .await
        .expect("fetch should succeed");

    assert_eq!(videos.len(), 1, "entry without publishedAt is skipped");
    let v = &videos[0];
    assert_eq!(v.video_id, "vid1");
    assert_eq!(v.title.as_deref(), Some("Kept"));
    assert_eq!(v.view_count, 500);
    assert_eq!(v.like_count, 25);
    assert_eq!(v.comment_count, 5);
}
