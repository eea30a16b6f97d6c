pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod views;

use middleware::SessionLocks;
use models::Catalog;
use std::sync::Arc;

/// Shared application state. Ledgers themselves live in the session; the
/// state holds what every new ledger is built from and the per-session locks.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub session_locks: SessionLocks,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            session_locks: SessionLocks::default(),
        }
    }
}
