use axum::{
    body::Body,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::SessionSettings;
use crate::handlers::{
    app::{health_check, metrics},
    ledger::{edit_field, index, save},
};
use crate::middleware::{session_lock_middleware, SESSION_COOKIE_NAME};
use crate::AppState;

pub fn build_router(state: AppState, session_settings: &SessionSettings) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            session_settings.expiry_hours,
        )));

    Router::new()
        .route("/", get(index))
        .route("/ledger/edit", post(edit_field))
        .route("/ledger/save", post(save))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(session_layer)
        // Outside the session layer, so the store write-back happens under the lock
        .layer(from_fn_with_state(state.clone(), session_lock_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            make_request_span(request)
        }))
        // Outermost, so the trace span sees the request id it assigns
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
