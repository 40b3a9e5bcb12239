use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{User, UserRole};
use crate::db::repositories::UserRepository;
use crate::error::AppError;

/// Header the identity collaborator uses to hand over the authenticated
/// caller's id. Token issuance and verification happen upstream; this
/// backend only resolves the id to a user row for authorization.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller, resolved against the users table.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn require_provider(&self) -> Result<(), AppError> {
        if self.0.role == UserRole::Provider {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "not authorized as a provider".to_string(),
            ))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| {
                AppError::Authentication("not authorized, no valid caller id".to_string())
            })?;

        let user = UserRepository::get_user_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("not authorized, unknown user".to_string()))?;

        Ok(AuthUser(user))
    }
}
