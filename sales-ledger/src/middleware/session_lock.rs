//! One request at a time per session.
//!
//! Handlers load the ledger from the session, change it, and the session layer
//! writes it back after the handler returns. Two overlapping requests for the
//! same session would otherwise both load the same snapshot and the later
//! write would drop the earlier edit. This layer sits outside the session layer
//! so the lock covers the load, the handler, and the store write.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::AppState;

/// Name of the session cookie set by the session layer.
pub const SESSION_COOKIE_NAME: &str = "sales_ledger_session";

/// Per-session async locks, keyed by session cookie value. Entries are removed
/// once no request holds or waits on them.
#[derive(Clone, Default)]
pub struct SessionLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl SessionLocks {
    pub async fn acquire(&self, key: &str) -> SessionGuard {
        let entry = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = entry.clone().lock_owned().await;

        SessionGuard {
            locks: self.clone(),
            key: key.to_string(),
            entry,
            guard: Some(guard),
        }
    }
}

/// Held for the lifetime of one request.
pub struct SessionGuard {
    locks: SessionLocks,
    key: String,
    entry: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.guard.take();

        let mut locks = self
            .locks
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map and this guard still reference the lock
        if Arc::strong_count(&self.entry) == 2 {
            locks.remove(&self.key);
        }
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value)
}

/// Serializes requests that carry the same session cookie. Requests without
/// one get a brand new session and pass straight through.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = session_cookie(request.headers()).map(str::to_string) else {
        return next.run(request).await;
    };

    let _guard = state.session_locks.acquire(&key).await;
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::time::Duration;

    fn tracked(locks: &SessionLocks) -> usize {
        locks.inner.lock().unwrap().len()
    }

    #[test]
    fn test_session_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sales_ledger_session=abc123; lang=en"),
        );
        assert_eq!(session_cookie(&headers), Some("abc123"));
    }

    #[test]
    fn test_missing_session_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("id=abc123"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[tokio::test]
    async fn test_same_key_waits_for_release() {
        let locks = SessionLocks::default();
        let first = locks.acquire("a").await;

        let waiting = tokio::spawn({
            let locks = locks.clone();
            async move {
                let _second = locks.acquire("a").await;
            }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(first);
        waiting.await.unwrap();
        assert_eq!(tracked(&locks), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = SessionLocks::default();
        let _a = locks.acquire("a").await;
        let _b = locks.acquire("b").await;
        assert_eq!(tracked(&locks), 2);
    }
}
