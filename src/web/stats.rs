use crate::db;
use crate::domain::models::UserRole;
use crate::domain::stress::{self, StressScores};
use crate::state::SharedState;
use crate::web::session::{require_role, AuthUser};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct EmployeeStress {
    pub name: String,
    pub professional: f64,
    pub personal: f64,
}

#[derive(Serialize)]
pub struct TeamAverage {
    pub professional: f64,
    pub personal: f64,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/employee-stress", get(employee_stress))
        .route("/team-average", get(team_average))
        .with_state(state)
}

async fn employee_stress(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<EmployeeStress>>, StatusCode> {
    require_role(&user, UserRole::Gestor)?;

    let employees = db::list_employees(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let rows = employees
        .into_iter()
        .map(|e| EmployeeStress {
            name: e.full_name,
            professional: e.stress_professional.unwrap_or(0.0),
            personal: e.stress_personal.unwrap_or(0.0),
        })
        .collect();
    Ok(Json(rows))
}

async fn team_average(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<TeamAverage>, StatusCode> {
    require_role(&user, UserRole::Gestor)?;

    let employees = db::list_employees(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let scores: Vec<StressScores> = employees
        .iter()
        .map(|e| StressScores {
            personal: e.stress_personal.unwrap_or(0.0),
            professional: e.stress_professional.unwrap_or(0.0),
        })
        .collect();

    let average = stress::team_average(&scores);
    Ok(Json(TeamAverage {
        professional: average.professional,
        personal: average.personal,
    }))
}
