use std::net::SocketAddr;
use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YAML catalog of materials and routes. `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// CSV price sheet served by the price-sheet endpoints, if any.
    pub price_sheet_path: Option<PathBuf>,
    /// Haul charge per hour of round-trip time.
    pub hourly_rate: Decimal,
    /// Per-ton floor for the haul charge.
    pub minimum_rate: Decimal,
    /// Flat amount added to listed prices during normalization.
    pub surcharge: Option<Decimal>,
    pub default_tons: Decimal,
}
