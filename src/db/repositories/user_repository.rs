use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{PublicProvider, User, UserRole};
use crate::db::DatabaseError;

pub struct UserRepository;

impl UserRepository {
    pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn list_providers(pool: &PgPool) -> Result<Vec<PublicProvider>, DatabaseError> {
        let providers = sqlx::query_as::<_, PublicProvider>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE role = $1
            ORDER BY name
            "#,
        )
        .bind(UserRole::Provider)
        .fetch_all(pool)
        .await?;

        Ok(providers)
    }

    pub async fn get_provider(
        pool: &PgPool,
        provider_id: Uuid,
    ) -> Result<Option<PublicProvider>, DatabaseError> {
        let provider = sqlx::query_as::<_, PublicProvider>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1 AND role = $2
            "#,
        )
        .bind(provider_id)
        .bind(UserRole::Provider)
        .fetch_optional(pool)
        .await?;

        Ok(provider)
    }
}
