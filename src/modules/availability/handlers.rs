use std::collections::HashSet;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{AvailabilityRule, NewAvailabilityRule};
use crate::db::repositories::AvailabilityRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ReplaceAvailabilityPayload {
    pub availability: Vec<NewAvailabilityRule>,
}

/// Full-replace write: the provider's entire weekly schedule is swapped for
/// the submitted set in one transaction.
pub async fn set_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ReplaceAvailabilityPayload>,
) -> AppResult<(StatusCode, Json<Value>)> {
    user.require_provider()?;

    let mut seen_days = HashSet::new();
    for rule in &payload.availability {
        rule.validate()?;
        if !seen_days.insert(rule.day_of_week) {
            return Err(AppError::Validation(format!(
                "duplicate availability rule for day_of_week {}",
                rule.day_of_week
            )));
        }
    }

    let count =
        AvailabilityRepository::replace_for_provider(&state.db, user.id(), &payload.availability)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Availability set successfully", "count": count })),
    ))
}

pub async fn get_availability(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<AvailabilityRule>>> {
    user.require_provider()?;

    let rules = AvailabilityRepository::list_for_provider(&state.db, user.id()).await?;

    Ok(Json(rules))
}
