use axum::{routing::get, Router};

use super::handlers::{get_provider, list_providers};
use crate::app_state::AppState;

pub fn provider_routes() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/provider/{provider_id}", get(get_provider))
}
