use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Provider,
    Customer,
}

/// Account row. Credentials and sessions are handled by the upstream
/// identity collaborator; this table only carries what authorization and
/// display need.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Public-safe projection for the provider directory.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PublicProvider {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
