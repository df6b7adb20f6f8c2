//! Learnpath API server binary.

use std::sync::Arc;

use clap::Parser;
use learnpath_core::roadmap::RoadmapPlanner;
use learnpath_core::roadmap::gemini::{DEFAULT_GEMINI_MODEL, GeminiGenerator};
use learnpath_core::video::youtube::YouTubeClient;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "learnpath_api_server", about = "Learnpath API server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/learnpath"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Gemini model used for roadmap generation.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,learnpath_api=debug,learnpath_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, bind_addr = %args.bind_addr, "starting learnpath_api_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    learnpath_api::migrate(&pool).await?;

    let config = learnpath_api::config::ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        jwt_secret: learnpath_core::auth::jwt::resolve_jwt_secret(),
        gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
        gemini_model: args.gemini_model,
        youtube_api_key: std::env::var("GOOGLE_YT_API_KEY").unwrap_or_default(),
    };

    if config.gemini_api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; roadmap generation will fail");
    }
    if config.youtube_api_key.is_empty() {
        warn!("GOOGLE_YT_API_KEY is not set; video search will fail");
    }

    let generator = GeminiGenerator::new(config.gemini_api_key.clone(), &config.gemini_model);
    let videos = YouTubeClient::new(config.youtube_api_key.clone());

    let state = learnpath_api::AppState {
        pool,
        config: config.clone(),
        roadmap: Arc::new(RoadmapPlanner::new(Arc::new(generator))),
        videos: Arc::new(videos),
    };

    let app = learnpath_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
