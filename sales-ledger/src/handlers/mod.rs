pub mod app;
pub mod ledger;
