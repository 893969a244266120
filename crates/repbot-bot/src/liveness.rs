//! Liveness HTTP endpoint
//!
//! Lets a hosting platform probe the process: `/` for a plain-text check,
//! `/health` and `/health/ready` for JSON probes.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use repbot_db::PgPool;
use serde::Serialize;
use tower_http::trace::TraceLayer;

/// Body of `GET /`
pub const ACTIVE_MESSAGE: &str = "Bot is active!";

/// Shared state of the liveness router
#[derive(Clone)]
pub struct LivenessState {
    pool: PgPool,
}

impl LivenessState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" },
            database: if database_healthy { "healthy" } else { "unhealthy" },
        }
    }
}

/// GET /
async fn root() -> &'static str {
    ACTIVE_MESSAGE
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/ready
async fn readiness_check(State(state): State<LivenessState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.pool.acquire().await.is_ok();

    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadinessResponse::ready(db_healthy)))
}

/// Build the liveness router
pub fn create_router(state: LivenessState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
