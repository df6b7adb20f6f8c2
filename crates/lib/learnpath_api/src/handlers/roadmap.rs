//! Roadmap generation handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{RoadmapRequest, RoadmapResponse};

/// `POST /roadmap` — generate a day-wise learning roadmap.
pub async fn generate_roadmap_handler(
    State(state): State<AppState>,
    Json(body): Json<RoadmapRequest>,
) -> AppResult<Json<RoadmapResponse>> {
    if body.topic.trim().is_empty() {
        return Err(AppError::Validation("topic is required".into()));
    }
    if body.time_commitment.trim().is_empty() {
        return Err(AppError::Validation("timeCommitment is required".into()));
    }

    let roadmap = state
        .roadmap
        .generate(&body.topic, &body.time_commitment)
        .await?;

    Ok(Json(RoadmapResponse { roadmap }))
}
