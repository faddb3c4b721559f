use crate::db::{self, Notification, WeeklyForm};
use crate::domain::stress;
use crate::state::SharedState;
use crate::web::session::AuthUser;
use crate::web::ApiMessage;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use std::collections::HashMap;
use uuid::Uuid;

const MY_FORMS_LIMIT: i64 = 10;

/// Deliberately has no `user_id` field: the owner is always the
/// authenticated caller, and any client-supplied value is dropped during
/// deserialization.
#[derive(Deserialize)]
pub struct SubmitFormPayload {
    pub week: String,
    pub responses: HashMap<String, i32>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(submit))
        .route("/my-forms", get(my_forms))
        .with_state(state)
}

async fn submit(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(payload): Json<SubmitFormPayload>,
) -> Result<Json<ApiMessage>, StatusCode> {
    let scores = stress::stress_scores(&payload.responses);

    let form = WeeklyForm {
        id: Uuid::new_v4(),
        user_id: user.id,
        week: payload.week,
        responses: SqlJson(payload.responses),
        created_at: Utc::now(),
    };

    db::insert_weekly_form(&state.pool, &form)
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist weekly form: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    // The form insert decides the response; the cached-score update and the
    // confirmation notification are best-effort side effects.
    if let Err(e) =
        db::update_user_stress(&state.pool, user.id, scores.personal, scores.professional).await
    {
        tracing::warn!("Stress update failed for user {}: {}", user.id, e);
    }

    let notification = Notification {
        id: Uuid::new_v4(),
        user_id: user.id,
        title: "Formulário Enviado".to_string(),
        description: "Seu formulário semanal foi enviado com sucesso".to_string(),
        icon: "check".to_string(),
        read: false,
        created_at: Utc::now(),
    };
    if let Err(e) = db::insert_notification(&state.pool, &notification).await {
        tracing::warn!("Confirmation notification failed for user {}: {}", user.id, e);
    }

    Ok(Json(ApiMessage {
        message: "Formulário enviado com sucesso".to_string(),
    }))
}

async fn my_forms(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<WeeklyForm>>, StatusCode> {
    let forms = db::forms_for_user(&state.pool, user.id, MY_FORMS_LIMIT)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(forms))
}
