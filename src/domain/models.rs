use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Gestor,
    Funcionario,
}

/// User projection safe to serialize in responses. The password hash only
/// lives on `db::DbUser`, which deliberately does not implement `Serialize`.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub full_name: String,
    pub position: String,
    pub sector: String,
    pub photo: String,
    pub age: i32,
    pub shift: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_personal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_professional: Option<f64>,
}

impl From<crate::db::DbUser> for PublicUser {
    fn from(user: crate::db::DbUser) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            role: user.role,
            full_name: user.full_name,
            position: user.position,
            sector: user.sector,
            photo: user.photo,
            age: user.age,
            shift: user.shift,
            stress_personal: user.stress_personal,
            stress_professional: user.stress_professional,
        }
    }
}
