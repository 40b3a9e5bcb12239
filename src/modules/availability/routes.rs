use axum::{routing::post, Router};

use super::handlers::{get_availability, set_availability};
use crate::app_state::AppState;

pub fn availability_routes() -> Router<AppState> {
    Router::new().route("/", post(set_availability).get(get_availability))
}
