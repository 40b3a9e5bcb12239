use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{Booking, CustomerBooking};
use crate::db::repositories::{BookingRepository, ServiceRepository};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Date,
    pub service_id: Uuid,
}

/// Bookable start instants for one provider, service and date. Public:
/// customers browse slots before committing to anything.
pub async fn available_slots(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<String>>> {
    let service = ServiceRepository::get(&state.db, query.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("service not found".to_string()))?;

    let slots = state
        .scheduler
        .available_slots(provider_id, &service, query.date)
        .await?;

    let body = slots
        .iter()
        .map(|slot| slot.format(&Rfc3339))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingPayload {
    pub service_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
}

/// Books a slot for the authenticated caller. The scheduler re-validates
/// the interval under the provider lock; a stale slot yields 409.
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBookingPayload>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let service = ServiceRepository::get(&state.db, payload.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("service not found".to_string()))?;

    let booking = state
        .scheduler
        .create_booking(&service, user.id(), payload.start_time)
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<CustomerBooking>>> {
    let bookings = BookingRepository::for_customer(&state.db, user.id()).await?;

    Ok(Json(bookings))
}
