use crate::db::{self, WeeklyForm};
use crate::domain::models::PublicUser;
use crate::state::SharedState;
use crate::web::session::AuthUser;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

const RECENT_FORMS_LIMIT: i64 = 4;

#[derive(Serialize)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub user: PublicUser,
    pub recent_forms: Vec<WeeklyForm>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(detail))
        .with_state(state)
}

async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<PublicUser>>, StatusCode> {
    let employees = db::list_employees(&state.pool)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(employees.into_iter().map(PublicUser::from).collect()))
}

async fn detail(
    AuthUser(_user): AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeDetail>, StatusCode> {
    let employee = db::find_user_by_id(&state.pool, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let recent_forms = db::forms_for_user(&state.pool, employee.id, RECENT_FORMS_LIMIT)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(EmployeeDetail {
        user: employee.into(),
        recent_forms,
    }))
}
