//! Health endpoint — bootstrap check.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /health` — verifies the core lib and DB connectivity.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    // Check PostgreSQL connectivity.
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: learnpath_core::version().to_string(),
        db_connected,
    }))
}
