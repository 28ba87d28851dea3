use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use vidwatch_core::VideoRecord;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct VideosQuery {
    pub limit: Option<i64>,
}

/// Most recent videos first, capped by `limit` (default 50, max 500).
pub(super) async fn list_videos(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<VideosQuery>,
) -> Result<Json<ApiResponse<Vec<VideoRecord>>>, ApiError> {
    let records = vidwatch_db::list_videos_chronological(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let limit = normalize_limit(query.limit);
    let data: Vec<VideoRecord> = records.into_iter().rev().take(limit).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
