pub mod seed;

use crate::domain::models::UserRole;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

/// Full user row. Not `Serialize` on purpose: the password hash must never
/// reach a response payload, so handlers convert to `PublicUser` first.
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub position: String,
    pub sector: String,
    pub photo: String,
    pub age: i32,
    pub shift: String,
    pub stress_personal: Option<f64>,
    pub stress_professional: Option<f64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct WeeklyForm {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week: String,
    pub responses: Json<HashMap<String, i32>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct EnvironmentReading {
    pub id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: i32,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CorrectiveAction {
    pub id: Uuid,
    pub target_user_id: Option<Uuid>,
    pub action: String,
    pub description: String,
    pub applied_by: Uuid,
    pub created_at: DateTime<Utc>,
}

pub async fn find_user_by_username(pool: &PgPool, username: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT
            id,
            username,
            password_hash,
            role,
            full_name,
            position,
            sector,
            photo,
            age,
            shift,
            stress_personal,
            stress_professional
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT
            id,
            username,
            password_hash,
            role,
            full_name,
            position,
            sector,
            photo,
            age,
            shift,
            stress_personal,
            stress_professional
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn list_employees(pool: &PgPool) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT
            id,
            username,
            password_hash,
            role,
            full_name,
            position,
            sector,
            photo,
            age,
            shift,
            stress_personal,
            stress_professional
        FROM users
        WHERE role = $1
        ORDER BY full_name
        "#,
    )
    .bind(UserRole::Funcionario)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Overwrites the cached stress scores; no history beyond the raw form log.
pub async fn update_user_stress(
    pool: &PgPool,
    user_id: Uuid,
    personal: f64,
    professional: f64,
) -> Result<()> {
    sqlx::query("UPDATE users SET stress_personal = $2, stress_professional = $3 WHERE id = $1")
        .bind(user_id)
        .bind(personal)
        .bind(professional)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_weekly_form(pool: &PgPool, form: &WeeklyForm) -> Result<()> {
    sqlx::query(
        "INSERT INTO weekly_forms (id, user_id, week, responses, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(form.id)
    .bind(form.user_id)
    .bind(&form.week)
    .bind(Json(&form.responses.0))
    .bind(form.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn forms_for_user(pool: &PgPool, user_id: Uuid, limit: i64) -> Result<Vec<WeeklyForm>> {
    let forms = sqlx::query_as::<_, WeeklyForm>(
        r#"
        SELECT id, user_id, week, responses, created_at
        FROM weekly_forms
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(forms)
}

pub async fn insert_environment_reading(pool: &PgPool, reading: &EnvironmentReading) -> Result<()> {
    sqlx::query(
        "INSERT INTO environment_readings (id, temperature, humidity, air_quality, recorded_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(reading.id)
    .bind(reading.temperature)
    .bind(reading.humidity)
    .bind(reading.air_quality)
    .bind(reading.recorded_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn latest_environment_reading(pool: &PgPool) -> Result<Option<EnvironmentReading>> {
    let reading = sqlx::query_as::<_, EnvironmentReading>(
        r#"
        SELECT id, temperature, humidity, air_quality, recorded_at
        FROM environment_readings
        ORDER BY recorded_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(reading)
}

pub async fn insert_notification(pool: &PgPool, notification: &Notification) -> Result<()> {
    sqlx::query(
        "INSERT INTO notifications (id, user_id, title, description, icon, read, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(notification.id)
    .bind(notification.user_id)
    .bind(&notification.title)
    .bind(&notification.description)
    .bind(&notification.icon)
    .bind(notification.read)
    .bind(notification.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn notifications_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, user_id, title, description, icon, read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(notifications)
}

/// Flips `read` only when the notification belongs to the caller. A miss on
/// either condition updates zero rows, which callers treat as success.
pub async fn mark_notification_read(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<()> {
    sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_corrective_action(pool: &PgPool, action: &CorrectiveAction) -> Result<()> {
    sqlx::query(
        "INSERT INTO corrective_actions (id, target_user_id, action, description, applied_by, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(action.id)
    .bind(action.target_user_id)
    .bind(&action.action)
    .bind(&action.description)
    .bind(action.applied_by)
    .bind(action.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn recent_actions(pool: &PgPool, limit: i64) -> Result<Vec<CorrectiveAction>> {
    let actions = sqlx::query_as::<_, CorrectiveAction>(
        r#"
        SELECT id, target_user_id, action, description, applied_by, created_at
        FROM corrective_actions
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(actions)
}
