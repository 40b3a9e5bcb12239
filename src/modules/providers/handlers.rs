use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{PublicProvider, Service};
use crate::db::repositories::{ServiceRepository, UserRepository};
use crate::error::{AppError, AppResult};

pub async fn list_providers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PublicProvider>>> {
    let providers = UserRepository::list_providers(&state.db).await?;

    Ok(Json(providers))
}

#[derive(Debug, Serialize)]
pub struct ProviderDetail {
    #[serde(flatten)]
    pub provider: PublicProvider,
    pub services: Vec<Service>,
}

pub async fn get_provider(
    State(state): State<AppState>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<ProviderDetail>> {
    let provider = UserRepository::get_provider(&state.db, provider_id)
        .await?
        .ok_or_else(|| AppError::NotFound("provider not found".to_string()))?;

    let services = ServiceRepository::list_for_provider(&state.db, provider_id).await?;

    Ok(Json(ProviderDetail { provider, services }))
}
