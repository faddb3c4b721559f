use crate::db::{self, CorrectiveAction, Notification};
use crate::domain::models::UserRole;
use crate::state::SharedState;
use crate::web::session::{require_role, AuthUser};
use crate::web::ApiMessage;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

const ACTIONS_LIMIT: i64 = 20;

#[derive(Deserialize)]
pub struct CreateActionPayload {
    /// Absent means a general action, broadcast to every employee.
    pub target_user_id: Option<Uuid>,
    pub action: String,
    pub description: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(create).get(list))
        .with_state(state)
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(payload): Json<CreateActionPayload>,
) -> Result<Json<ApiMessage>, StatusCode> {
    require_role(&user, UserRole::Gestor)?;

    let action = CorrectiveAction {
        id: Uuid::new_v4(),
        target_user_id: payload.target_user_id,
        action: payload.action,
        description: payload.description,
        applied_by: user.id,
        created_at: Utc::now(),
    };

    db::insert_corrective_action(&state.pool, &action)
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist corrective action: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let description = format!("Gestor aplicou: {}", action.action);

    match action.target_user_id {
        Some(target) => {
            let notification = Notification {
                id: Uuid::new_v4(),
                user_id: target,
                title: "Ação Corretiva Aplicada".to_string(),
                description,
                icon: "alert-circle".to_string(),
                read: false,
                created_at: Utc::now(),
            };
            if let Err(e) = db::insert_notification(&state.pool, &notification).await {
                tracing::warn!("Action notification failed for user {}: {}", target, e);
            }
        }
        None => {
            let employees = db::list_employees(&state.pool)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            for employee in &employees {
                let notification = Notification {
                    id: Uuid::new_v4(),
                    user_id: employee.id,
                    title: "Ação Corretiva Geral".to_string(),
                    description: description.clone(),
                    icon: "alert-circle".to_string(),
                    read: false,
                    created_at: Utc::now(),
                };
                if let Err(e) = db::insert_notification(&state.pool, &notification).await {
                    tracing::warn!(
                        "Action broadcast failed for user {}: {}",
                        employee.id,
                        e
                    );
                }
            }
        }
    }

    Ok(Json(ApiMessage {
        message: "Ação criada com sucesso".to_string(),
    }))
}

async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<CorrectiveAction>>, StatusCode> {
    let actions = db::recent_actions(&state.pool, ACTIONS_LIMIT)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(actions))
}
