//! Domain models for sales-ledger.

mod catalog;
mod sale;

pub use catalog::{
    COOKIE_VARIETIES, Catalog, CatalogError, DEFAULT_PACKAGES_PER_CASE, DEFAULT_PRICE_PER_UNIT,
    MAX_PACKAGES_PER_CASE,
};
pub use sale::{EditableField, SalesRecord, UnknownField, parse_count};
