use crate::db::{self, EnvironmentReading, Notification};
use crate::domain::models::UserRole;
use crate::state::SharedState;
use crate::web::session::{require_role, AuthUser};
use crate::web::ApiMessage;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReadingPayload {
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: i32,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(current).post(update))
        .with_state(state)
}

/// Unauthenticated: the dashboard polls this before login. An empty log
/// yields a fixed fallback reading that is never persisted.
async fn current(
    State(state): State<SharedState>,
) -> Result<Json<EnvironmentReading>, StatusCode> {
    let reading = db::latest_environment_reading(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .unwrap_or_else(|| EnvironmentReading {
            id: Uuid::new_v4(),
            temperature: 23.5,
            humidity: 65.0,
            air_quality: 85,
            recorded_at: Utc::now(),
        });
    Ok(Json(reading))
}

/// Sensor ingestion path: devices POST through the gestor-authenticated flow.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(payload): Json<ReadingPayload>,
) -> Result<Json<ApiMessage>, StatusCode> {
    require_role(&user, UserRole::Gestor)?;

    let reading = EnvironmentReading {
        id: Uuid::new_v4(),
        temperature: payload.temperature,
        humidity: payload.humidity,
        air_quality: payload.air_quality,
        recorded_at: Utc::now(),
    };

    db::insert_environment_reading(&state.pool, &reading)
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist environment reading: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    // One notification per employee; a failed insert skips that recipient
    // but never fails the reading itself.
    let employees = db::list_employees(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let description = format!(
        "Temperatura: {}°C, Umidade: {}%, Qualidade do ar: {}%",
        reading.temperature, reading.humidity, reading.air_quality
    );

    let mut notified = 0usize;
    for employee in &employees {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: employee.id,
            title: "Ambiente Atualizado".to_string(),
            description: description.clone(),
            icon: "wind".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        match db::insert_notification(&state.pool, &notification).await {
            Ok(()) => notified += 1,
            Err(e) => {
                tracing::warn!("Environment notification failed for user {}: {}", employee.id, e);
            }
        }
    }
    tracing::info!("Environment update notified {} of {} employees", notified, employees.len());

    Ok(Json(ApiMessage {
        message: "Ambiente atualizado".to_string(),
    }))
}
