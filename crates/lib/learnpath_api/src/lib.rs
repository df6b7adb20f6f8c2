//! # learnpath_api
//!
//! HTTP API library for Learnpath.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use learnpath_core::roadmap::RoadmapPlanner;
use learnpath_core::video::VideoIndex;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, health, roadmap, videos};

/// Shared application state passed to all handlers.
///
/// External collaborators (model, video index) live here as trait objects
/// so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Roadmap generation service.
    pub roadmap: Arc<RoadmapPlanner>,
    /// External video index.
    pub videos: Arc<dyn VideoIndex>,
}

/// Run embedded database migrations.
///
/// Delegates to `learnpath_core::migrate::migrate()` which owns the
/// migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    learnpath_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    // Protected routes (require a Bearer session token)
    let protected = Router::new()
        .route("/roadmap", post(roadmap::generate_roadmap_handler))
        .route("/videos/search", get(videos::search_videos_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
