use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewService, Service, UpdateServicePayload};
use crate::db::DatabaseError;

pub struct ServiceRepository;

impl ServiceRepository {
    pub async fn create(
        pool: &PgPool,
        provider_id: Uuid,
        data: &NewService,
    ) -> Result<Service, DatabaseError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (provider_id, name, description, price, duration_minutes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, provider_id, name, description, price, duration_minutes, created_at
            "#,
        )
        .bind(provider_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.duration_minutes)
        .fetch_one(pool)
        .await?;

        Ok(service)
    }

    pub async fn get(pool: &PgPool, service_id: Uuid) -> Result<Option<Service>, DatabaseError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, name, description, price, duration_minutes, created_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(pool)
        .await?;

        Ok(service)
    }

    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: Uuid,
    ) -> Result<Vec<Service>, DatabaseError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, provider_id, name, description, price, duration_minutes, created_at
            FROM services
            WHERE provider_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;

        Ok(services)
    }

    pub async fn update(
        pool: &PgPool,
        service_id: Uuid,
        data: &UpdateServicePayload,
    ) -> Result<Service, DatabaseError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                duration_minutes = COALESCE($4, duration_minutes)
            WHERE id = $5
            RETURNING id, provider_id, name, description, price, duration_minutes, created_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.duration_minutes)
        .bind(service_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;

        Ok(service)
    }

    pub async fn delete(pool: &PgPool, service_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }

        Ok(())
    }
}
