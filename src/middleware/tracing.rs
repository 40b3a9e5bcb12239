use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Wraps every request in a span carrying the matched route and a fresh
/// request id, and logs status + latency on completion.
pub async fn observability_middleware(
    matched_path: MatchedPath,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = matched_path.as_str().to_string();
    let start_time = Instant::now();

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        route = %route,
        request_id = %uuid::Uuid::now_v7(),
    );

    let response = next.run(request).instrument(span).await;

    let latency_ms = start_time.elapsed().as_millis() as u64;
    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        latency_ms,
        "request completed"
    );

    response
}
