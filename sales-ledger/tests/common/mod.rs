//! Common test utilities for sales-ledger integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use sales_ledger::config::SessionSettings;
use sales_ledger::models::Catalog;
use sales_ledger::startup::build_router;
use sales_ledger::AppState;
use std::sync::Once;
use tower::util::ServiceExt;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,sales_ledger=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Router over the default catalog with a fresh in-memory session store.
pub fn spawn_app() -> Router {
    init_tracing();
    build_router(AppState::new(Catalog::default()), &SessionSettings::default())
}

/// A browser stand-in: remembers the session cookie between requests.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// A second client on the same session, for overlapping requests.
    pub fn fork(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: self.cookie.clone(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, String) {
        let request = self.builder("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = self
            .builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_htmx(&mut self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = self
            .builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("HX-Request", "true")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Posts one cell edit the way the page's htmx attributes do.
    pub async fn edit(&mut self, index: &str, field: &str, value: &str) -> (StatusCode, String) {
        let body = format!("index={}&field={}&value={}", index, field, value);
        self.post_htmx("/ledger/edit", &body).await
    }

    fn builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        self.remember_cookie(&response);
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn remember_cookie(&mut self, response: &Response<Body>) {
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            if let Some(pair) = set_cookie.split(';').next() {
                self.cookie = Some(pair.trim().to_string());
            }
        }
    }
}
