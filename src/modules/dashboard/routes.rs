use axum::{routing::get, Router};

use super::handlers::provider_dashboard;
use crate::app_state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(provider_dashboard))
}
