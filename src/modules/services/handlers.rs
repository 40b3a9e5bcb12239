use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewService, Service, UpdateServicePayload};
use crate::db::repositories::ServiceRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;

pub async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<NewService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    user.require_provider()?;
    payload.validate()?;

    let service = ServiceRepository::create(&state.db, user.id(), &payload).await?;

    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn my_services(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Service>>> {
    user.require_provider()?;

    let services = ServiceRepository::list_for_provider(&state.db, user.id()).await?;

    Ok(Json(services))
}

pub async fn update_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<UpdateServicePayload>,
) -> AppResult<Json<Service>> {
    user.require_provider()?;
    payload.validate()?;
    owned_service(&state, service_id, user.id()).await?;

    let updated = ServiceRepository::update(&state.db, service_id, &payload).await?;

    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(service_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    user.require_provider()?;
    owned_service(&state, service_id, user.id()).await?;

    ServiceRepository::delete(&state.db, service_id).await?;

    Ok(Json(json!({ "message": "Service deleted successfully" })))
}

// Non-owners see the same "not found" as a missing row.
async fn owned_service(
    state: &AppState,
    service_id: Uuid,
    provider_id: Uuid,
) -> AppResult<Service> {
    match ServiceRepository::get(&state.db, service_id).await? {
        Some(service) if service.provider_id == provider_id => Ok(service),
        _ => Err(AppError::NotFound(
            "service not found or not owned by caller".to_string(),
        )),
    }
}
