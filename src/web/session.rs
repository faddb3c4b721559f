use crate::db::{self, DbUser};
use crate::domain::models::UserRole;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap, StatusCode},
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub role: UserRole,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid token format")]
    Invalid,
    #[error("signature mismatch")]
    Signature,
    #[error("expired")]
    Expired,
    #[error("bad role")]
    Role,
}

pub fn sign_session(user_id: Uuid, role: UserRole, key: &[u8]) -> Result<String, SessionError> {
    let exp = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
    sign_session_with_exp(user_id, role, exp.timestamp(), key)
}

fn sign_session_with_exp(
    user_id: Uuid,
    role: UserRole,
    exp: i64,
    key: &[u8],
) -> Result<String, SessionError> {
    let payload = format!("{}|{}|{}", user_id, role_string(role), exp);
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(payload.as_bytes());
    let sig = mac.finalize().into_bytes();
    let token = format!(
        "{}.{}",
        general_purpose::STANDARD.encode(payload.as_bytes()),
        general_purpose::STANDARD.encode(sig)
    );
    Ok(token)
}

pub fn verify_session(token: &str, key: &[u8]) -> Result<SessionClaims, SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 2 {
        return Err(SessionError::Invalid);
    }
    let payload_bytes = general_purpose::STANDARD
        .decode(parts[0])
        .map_err(|_| SessionError::Invalid)?;
    let sig_bytes = general_purpose::STANDARD
        .decode(parts[1])
        .map_err(|_| SessionError::Invalid)?;

    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| SessionError::Invalid)?;
    mac.update(&payload_bytes);
    mac.verify_slice(&sig_bytes)
        .map_err(|_| SessionError::Signature)?;

    let payload = String::from_utf8(payload_bytes).map_err(|_| SessionError::Invalid)?;
    let pieces: Vec<&str> = payload.split('|').collect();
    if pieces.len() != 3 {
        return Err(SessionError::Invalid);
    }
    let user_id = Uuid::parse_str(pieces[0]).map_err(|_| SessionError::Invalid)?;
    let role = parse_role(pieces[1])?;
    let exp: i64 = pieces[2].parse().map_err(|_| SessionError::Invalid)?;
    if Utc::now().timestamp() > exp {
        return Err(SessionError::Expired);
    }
    Ok(SessionClaims { user_id, role, exp })
}

pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(axum::http::header::AUTHORIZATION)?;
    let val = auth.to_str().ok()?;
    let bearer = val.strip_prefix("Bearer ")?;
    Some(bearer.trim().to_string())
}

fn role_string(role: UserRole) -> &'static str {
    match role {
        UserRole::Gestor => "gestor",
        UserRole::Funcionario => "funcionario",
    }
}

fn parse_role(raw: &str) -> Result<UserRole, SessionError> {
    match raw {
        "gestor" => Ok(UserRole::Gestor),
        "funcionario" => Ok(UserRole::Funcionario),
        _ => Err(SessionError::Role),
    }
}

/// Single role gate for manager-only endpoints.
pub fn require_role(user: &DbUser, role: UserRole) -> Result<(), StatusCode> {
    if user.role == role {
        Ok(())
    } else {
        tracing::warn!("user {} denied: requires role {:?}", user.id, role);
        Err(StatusCode::FORBIDDEN)
    }
}

/// Axum extractor that validates the bearer token and loads the user.
///
/// Rejections: `401` for a missing/malformed/expired token, `404` when the
/// token is valid but the encoded user no longer exists.
pub struct AuthUser(pub DbUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    crate::state::SharedState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shared_state = crate::state::SharedState::from_ref(state);

        let token = extract_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;

        let claims = verify_session(&token, &shared_state.session_key).map_err(|e| {
            tracing::warn!("Session verification failed: {}", e);
            StatusCode::UNAUTHORIZED
        })?;

        let user = db::find_user_by_id(&shared_state.pool, claims.user_id)
            .await
            .map_err(|e| {
                tracing::error!("User lookup failed for session: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::NOT_FOUND)?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test-session-key-32-bytes-long!!";

    #[test]
    fn sign_then_verify_round_trips_claims() {
        let user_id = Uuid::new_v4();
        let token = sign_session(user_id, UserRole::Funcionario, KEY).unwrap();
        let claims = verify_session(&token, KEY).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, UserRole::Funcionario);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = sign_session(Uuid::new_v4(), UserRole::Funcionario, KEY).unwrap();
        let sig = token.split('.').nth(1).unwrap();
        let forged_payload = general_purpose::STANDARD.encode(
            format!("{}|gestor|{}", Uuid::new_v4(), Utc::now().timestamp() + 3600).as_bytes(),
        );
        let forged = format!("{forged_payload}.{sig}");
        assert!(matches!(
            verify_session(&forged, KEY),
            Err(SessionError::Signature)
        ));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = sign_session(Uuid::new_v4(), UserRole::Gestor, KEY).unwrap();
        assert!(matches!(
            verify_session(&token, b"another-key-entirely-here!!!!!!!"),
            Err(SessionError::Signature)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(matches!(
            verify_session("not-a-token", KEY),
            Err(SessionError::Invalid)
        ));
        assert!(matches!(
            verify_session("a.b.c", KEY),
            Err(SessionError::Invalid)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = Utc::now().timestamp() - 60;
        let token = sign_session_with_exp(Uuid::new_v4(), UserRole::Gestor, exp, KEY).unwrap();
        assert!(matches!(
            verify_session(&token, KEY),
            Err(SessionError::Expired)
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(matches!(parse_role("admin"), Err(SessionError::Role)));
    }

    #[test]
    fn bearer_header_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc.def".parse().unwrap(),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def"));

        let mut basic = HeaderMap::new();
        basic.insert(
            axum::http::header::AUTHORIZATION,
            "Basic abc".parse().unwrap(),
        );
        assert_eq!(extract_token(&basic), None);
    }

    fn user_with_role(role: UserRole) -> DbUser {
        DbUser {
            id: Uuid::new_v4(),
            username: "test".into(),
            password_hash: String::new(),
            role,
            full_name: "Test".into(),
            position: "Caixa".into(),
            sector: "Operacional".into(),
            photo: String::new(),
            age: 30,
            shift: "Tarde".into(),
            stress_personal: None,
            stress_professional: None,
        }
    }

    #[test]
    fn require_role_gates_on_exact_role() {
        let gestor = user_with_role(UserRole::Gestor);
        let funcionario = user_with_role(UserRole::Funcionario);
        assert!(require_role(&gestor, UserRole::Gestor).is_ok());
        assert_eq!(
            require_role(&funcionario, UserRole::Gestor),
            Err(StatusCode::FORBIDDEN)
        );
    }
}
