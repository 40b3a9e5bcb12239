use axum::http::{HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        availability::routes::availability_routes, bookings::routes::booking_routes,
        dashboard::routes::dashboard_routes, providers::routes::provider_routes,
        services::routes::service_routes,
    },
    websocket::websocket_routes,
};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.env.app.client_url.as_deref());

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .merge(websocket_routes())
        .nest("/api/services", service_routes())
        .nest("/api/availability", availability_routes())
        .nest("/api/bookings", booking_routes())
        .nest("/api/users", provider_routes())
        .nest("/api/dashboard", dashboard_routes())
        .layer(middleware::from_fn(observability_middleware))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(client_url: Option<&str>) -> CorsLayer {
    match client_url.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

async fn hello() -> &'static str {
    "Welcome to the Local Service Booking API!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).ok(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
