//! The fixed product catalog a ledger is initialized from.

use rust_decimal::Decimal;
use std::collections::HashSet;
use thiserror::Error;

/// Cookie varieties, in display order.
pub const COOKIE_VARIETIES: [&str; 9] = [
    "Adventurefuls",
    "Lemon-Ups",
    "Trefoils",
    "Do-si-dos",
    "Samoas",
    "Tagalongs",
    "Thin Mints",
    "S'mores",
    "Toffee-tastic",
];

pub const DEFAULT_PACKAGES_PER_CASE: i64 = 12;

/// Upper bound on case size. Together with `i32`-bounded counts it keeps
/// every row total well inside `i64`.
pub const MAX_PACKAGES_PER_CASE: i64 = 10_000;

/// 6.00 per package.
pub const DEFAULT_PRICE_PER_UNIT: Decimal = Decimal::from_parts(600, 0, 0, false, 2);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog must contain at least one item")]
    Empty,

    #[error("catalog item at position {0} has a blank name")]
    BlankName(usize),

    #[error("catalog item {0:?} appears more than once")]
    DuplicateName(String),

    #[error("packages per case must be between 1 and 10000, got {0}")]
    InvalidPackagesPerCase(i64),

    #[error("price per unit must not be negative, got {0}")]
    NegativePrice(Decimal),
}

/// Item names plus the pricing constants shared by every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<String>,
    price_per_unit: Decimal,
    packages_per_case: i64,
}

impl Catalog {
    pub fn new(
        items: Vec<String>,
        price_per_unit: Decimal,
        packages_per_case: i64,
    ) -> Result<Self, CatalogError> {
        if items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if item.trim().is_empty() {
                return Err(CatalogError::BlankName(position));
            }
            if !seen.insert(item.as_str()) {
                return Err(CatalogError::DuplicateName(item.clone()));
            }
        }

        if !(1..=MAX_PACKAGES_PER_CASE).contains(&packages_per_case) {
            return Err(CatalogError::InvalidPackagesPerCase(packages_per_case));
        }
        if price_per_unit < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(price_per_unit));
        }

        Ok(Self {
            items,
            price_per_unit,
            packages_per_case,
        })
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    pub fn packages_per_case(&self) -> i64 {
        self.packages_per_case
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: COOKIE_VARIETIES.iter().map(|name| name.to_string()).collect(),
            price_per_unit: DEFAULT_PRICE_PER_UNIT,
            packages_per_case: DEFAULT_PACKAGES_PER_CASE,
        }
    }
}
