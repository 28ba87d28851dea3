use axum::{extract::State, Extension, Json};
use vidwatch_analysis::{run_analysis, AnalysisError, AnalysisOptions, AnalysisResult};
use vidwatch_db::PgVideoStore;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Run the analytics pipeline end-to-end and return the full bundle.
///
/// No caching: each request re-reads the store and re-classifies, so
/// the dashboard always sees the current record set.
pub(super) async fn get_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<AnalysisResult>>, ApiError> {
    let store = PgVideoStore::new(state.pool.clone());
    let options = AnalysisOptions {
        classify_concurrency: state.classify_concurrency,
    };

    let result = run_analysis(&store, &*state.classifier, &options)
        .await
        .map_err(|e| map_analysis_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::EmptyDataset => ApiError::new(
            request_id,
            "not_found",
            "no videos have been fetched yet",
        ),
        AnalysisError::OutOfOrder { .. } | AnalysisError::Store(_) => {
            tracing::error!(error = %error, "analysis run failed");
            ApiError::new(request_id, "internal_error", "analysis run failed")
        }
    }
}
