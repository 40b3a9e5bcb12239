use axum::{routing::get, Router};

use super::ws_handler::ws_handler;
use crate::app_state::AppState;

pub fn websocket_routes() -> Router<AppState> {
    Router::new().route("/ws/{provider_id}", get(ws_handler))
}
