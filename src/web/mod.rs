pub mod actions;
pub mod auth;
pub mod employees;
pub mod environment;
pub mod forms;
pub mod notifications;
pub mod session;
pub mod stats;

use crate::db::seed;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiMessage {
    pub message: String,
}

async fn health() -> &'static str {
    "OK"
}

/// Idempotent sample-data seed, also run at startup. Exposed so a fresh
/// store can be initialized without restarting the service.
async fn init_db(State(state): State<SharedState>) -> Result<Json<ApiMessage>, StatusCode> {
    let seeded = seed::seed_all(&state.pool).await.map_err(|e| {
        tracing::error!("Seed failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let message = if seeded {
        "Database initialized successfully"
    } else {
        "Database already initialized"
    };
    Ok(Json(ApiMessage {
        message: message.to_string(),
    }))
}

pub fn routes(state: SharedState) -> Router {
    let api = Router::new()
        .route("/init-db", post(init_db))
        .with_state(state.clone())
        .nest("/auth", auth::router(state.clone()))
        .nest("/employees", employees::router(state.clone()))
        .nest("/forms", forms::router(state.clone()))
        .nest("/environment", environment::router(state.clone()))
        .nest("/notifications", notifications::router(state.clone()))
        .nest("/actions", actions::router(state.clone()))
        .nest("/stats", stats::router(state));

    Router::new().route("/health", get(health)).nest("/api", api)
}
