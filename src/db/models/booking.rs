use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// Committed booking row. Append-only: rows are never mutated once the
/// scheduler has inserted them.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub service_id: Uuid,
    pub customer_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Insert payload produced by the scheduler; `end_time` is already
/// `start_time + service duration`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub service_id: Uuid,
    pub customer_id: Uuid,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
}

/// Booking joined with service and provider names for the customer view.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct CustomerBooking {
    pub id: Uuid,
    pub service_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub service_name: String,
    pub provider_name: String,
}

/// Booking joined with service and customer details for the provider
/// dashboard.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ProviderBooking {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    pub service_name: String,
    pub customer_name: String,
    pub customer_email: String,
}
