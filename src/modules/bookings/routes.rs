use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{available_slots, create_booking, my_bookings};
use crate::app_state::AppState;

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/availability/{provider_id}", get(available_slots))
        .route("/my-bookings", get(my_bookings))
}
