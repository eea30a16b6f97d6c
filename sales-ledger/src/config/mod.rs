use crate::models::{
    Catalog, CatalogError, COOKIE_VARIETIES, DEFAULT_PACKAGES_PER_CASE, DEFAULT_PRICE_PER_UNIT,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use service_core::config::{load_layered, ObservabilitySettings};
use service_core::error::AppError;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ledger: LedgerSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Deserialize, Clone, Debug)]
pub struct LedgerSettings {
    /// Price of one package.
    #[serde(default = "default_price_per_unit")]
    pub price_per_unit: Decimal,
    #[serde(default = "default_packages_per_case")]
    pub packages_per_case: i64,
    /// Item names in display order.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<String>,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            price_per_unit: default_price_per_unit(),
            packages_per_case: default_packages_per_case(),
            catalog: default_catalog(),
        }
    }
}

impl LedgerSettings {
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(
            self.catalog.clone(),
            self.price_per_unit,
            self.packages_per_case,
        )
    }
}

fn default_price_per_unit() -> Decimal {
    DEFAULT_PRICE_PER_UNIT
}

fn default_packages_per_case() -> i64 {
    DEFAULT_PACKAGES_PER_CASE
}

fn default_catalog() -> Vec<String> {
    COOKIE_VARIETIES.iter().map(|name| name.to_string()).collect()
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    /// Ledgers are dropped after this much inactivity.
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiry_hours: default_expiry_hours(),
        }
    }
}

fn default_expiry_hours() -> i64 {
    24
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Check if we're already in sales-ledger directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("sales-ledger") {
        base_path.join("config")
    } else {
        base_path.join("sales-ledger").join("config")
    };

    load_layered(&configuration_directory)
}
