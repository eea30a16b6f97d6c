//! service-core: shared infrastructure for the sales ledger services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

