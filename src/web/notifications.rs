use crate::db::{self, Notification};
use crate::state::SharedState;
use crate::web::session::AuthUser;
use crate::web::ApiMessage;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

const NOTIFICATIONS_LIMIT: i64 = 20;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/:id/read", put(mark_read))
        .with_state(state)
}

async fn list(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Notification>>, StatusCode> {
    let notifications = db::notifications_for_user(&state.pool, user.id, NOTIFICATIONS_LIMIT)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(notifications))
}

/// Idempotent by contract: marking a notification that is missing or owned
/// by someone else is a silent success, not an error.
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiMessage>, StatusCode> {
    db::mark_notification_read(&state.pool, id, user.id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ApiMessage {
        message: "Notificação marcada como lida".to_string(),
    }))
}
