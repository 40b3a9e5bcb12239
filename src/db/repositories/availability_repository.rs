use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{AvailabilityRule, NewAvailabilityRule};
use crate::db::DatabaseError;

pub struct AvailabilityRepository;

impl AvailabilityRepository {
    /// Replaces the provider's whole weekly schedule in one transaction:
    /// existing rules are deleted and the new set inserted, all-or-nothing.
    pub async fn replace_for_provider(
        pool: &PgPool,
        provider_id: Uuid,
        rules: &[NewAvailabilityRule],
    ) -> Result<u64, DatabaseError> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM availability_rules WHERE provider_id = $1")
            .bind(provider_id)
            .execute(&mut *tx)
            .await?;

        let mut count = 0u64;
        for rule in rules {
            sqlx::query(
                r#"
                INSERT INTO availability_rules (provider_id, day_of_week, start_time, end_time)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(provider_id)
            .bind(rule.day_of_week)
            .bind(rule.start_time)
            .bind(rule.end_time)
            .execute(&mut *tx)
            .await?;
            count += 1;
        }

        tx.commit().await?;

        Ok(count)
    }

    pub async fn list_for_provider(
        pool: &PgPool,
        provider_id: Uuid,
    ) -> Result<Vec<AvailabilityRule>, DatabaseError> {
        let rules = sqlx::query_as::<_, AvailabilityRule>(
            r#"
            SELECT id, provider_id, day_of_week, start_time, end_time, created_at
            FROM availability_rules
            WHERE provider_id = $1
            ORDER BY day_of_week
            "#,
        )
        .bind(provider_id)
        .fetch_all(pool)
        .await?;

        Ok(rules)
    }

    /// At most one rule exists per (provider, day_of_week); absence is a
    /// valid empty-availability state, not an error.
    pub async fn for_day(
        pool: &PgPool,
        provider_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<AvailabilityRule>, DatabaseError> {
        let rule = sqlx::query_as::<_, AvailabilityRule>(
            r#"
            SELECT id, provider_id, day_of_week, start_time, end_time, created_at
            FROM availability_rules
            WHERE provider_id = $1 AND day_of_week = $2
            "#,
        )
        .bind(provider_id)
        .bind(day_of_week)
        .fetch_optional(pool)
        .await?;

        Ok(rule)
    }
}
