use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{create_service, delete_service, my_services, update_service};
use crate::app_state::AppState;

pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service))
        .route("/my-services", get(my_services))
        .route("/{service_id}", put(update_service).delete(delete_service))
}
