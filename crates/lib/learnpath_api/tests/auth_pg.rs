//! Auth flow integration test — ephemeral PG, migrations, register + login
//! through the router. Skips when no PostgreSQL toolchain is on PATH.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use learnpath_api::config::ApiConfig;
use learnpath_api::{AppState, router};
use learnpath_core::auth::jwt::verify_session_token;
use learnpath_core::auth::queries;
use learnpath_core::db::{DbError, EphemeralPostgres};
use learnpath_core::roadmap::{RoadmapError, RoadmapPlanner, TextGenerator};
use learnpath_core::video::{VideoError, VideoIndex, VideoMetadata};
use serde_json::{Value, json};
use tower::ServiceExt;

const JWT_SECRET: &str = "test-secret";

struct StubModel;

#[async_trait]
impl TextGenerator for StubModel {
    async fn generate(&self, _: &str, _: &Value) -> Result<String, RoadmapError> {
        Ok("[\"Day 1\"]".to_string())
    }
}

struct StubIndex;

#[async_trait]
impl VideoIndex for StubIndex {
    async fn search(&self, _: &str, _: u32) -> Result<Vec<VideoMetadata>, VideoError> {
        Ok(Vec::new())
    }
}

fn state_for(pool: sqlx::PgPool, database_url: String) -> AppState {
    AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url,
            jwt_secret: JWT_SECRET.into(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.5-flash".into(),
            youtube_api_key: String::new(),
        },
        roadmap: Arc::new(RoadmapPlanner::new(Arc::new(StubModel))),
        videos: Arc::new(StubIndex),
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn register_and_login_roundtrip() {
    let mut db = match EphemeralPostgres::new().await {
        Ok(db) => db,
        Err(DbError::PgConfigNotFound) => {
            eprintln!("skipping: pg_config not found on PATH");
            return;
        }
        Err(e) => panic!("PostgreSQL bootstrap failed: {e}"),
    };
    if let Err(e) = db.start().await {
        // Some environments have the client tools but cannot run a server
        // (e.g. initdb refuses to run as root).
        eprintln!("skipping: could not start ephemeral PostgreSQL: {e}");
        return;
    }

    let pool = sqlx::PgPool::connect(&db.connection_url())
        .await
        .expect("connect to ephemeral PG");
    learnpath_api::migrate(&pool).await.expect("migrate");

    let state = state_for(pool.clone(), db.connection_url());
    let app = router(state);

    // Register.
    let resp = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "ada@example.com", "password": "hunter22hunter", "fullName": "Ada"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user_id = body_json(resp).await["userId"]
        .as_str()
        .expect("userId is a string")
        .to_string();

    // A second registration with the same email conflicts and leaves
    // exactly one record behind.
    let resp = app
        .clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"email": "ada@example.com", "password": "hunter22hunter", "fullName": "Ada"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let count = queries::user_count_for_email(&pool, "ada@example.com")
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Login with the right password: token decodes to the registered user.
    let resp = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "ada@example.com", "password": "hunter22hunter"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let token = body["token"].as_str().expect("token is a string");
    let claims =
        verify_session_token(token, JWT_SECRET.as_bytes()).expect("token should verify");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "ada@example.com");

    // Wrong password and unknown email return identical bodies.
    let wrong_pw = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "ada@example.com", "password": "not-the-password"}),
        ))
        .await
        .unwrap();
    let unknown = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"email": "nobody@example.com", "password": "hunter22hunter"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong_pw).await, body_json(unknown).await);

    db.stop().await.expect("pg stop");
}
