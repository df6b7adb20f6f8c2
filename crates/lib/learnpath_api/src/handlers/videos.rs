//! Video search handler.

use axum::Json;
use axum::extract::{Query, State};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{VideoSearchQuery, VideoSearchResponse};

/// Upper bound accepted by the YouTube search API.
const MAX_RESULTS_CAP: u32 = 50;

/// `GET /videos/search` — forward a search to the external video index.
pub async fn search_videos_handler(
    State(state): State<AppState>,
    Query(params): Query<VideoSearchQuery>,
) -> AppResult<Json<VideoSearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(AppError::Validation("q is required".into()));
    }

    let max_results = params.max_results.clamp(1, MAX_RESULTS_CAP);
    let items = state.videos.search(&params.q, max_results).await?;

    Ok(Json(VideoSearchResponse { items }))
}
