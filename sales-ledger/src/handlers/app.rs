use axum::{http::StatusCode, response::IntoResponse};

pub async fn health_check() -> &'static str {
    "OK"
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        service_core::observability::render_metrics(),
    )
}
