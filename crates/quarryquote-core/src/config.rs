use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_decimal = |var: &str, raw: &str| -> Result<Decimal, ConfigError> {
        let value = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must not be negative, got {value}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("QUARRYQUOTE_ENV", "development"));
    let bind_addr = parse_addr("QUARRYQUOTE_BIND_ADDR", "0.0.0.0:5001")?;
    let log_level = or_default("QUARRYQUOTE_LOG_LEVEL", "info");
    let catalog_path = optional("QUARRYQUOTE_CATALOG_PATH").map(PathBuf::from);
    let price_sheet_path = optional("QUARRYQUOTE_PRICE_SHEET_PATH").map(PathBuf::from);

    let hourly_rate = parse_decimal(
        "QUARRYQUOTE_HOURLY_RATE",
        &or_default("QUARRYQUOTE_HOURLY_RATE", "130"),
    )?;
    let minimum_rate = parse_decimal(
        "QUARRYQUOTE_MINIMUM_RATE",
        &or_default("QUARRYQUOTE_MINIMUM_RATE", "6"),
    )?;
    let surcharge = optional("QUARRYQUOTE_SURCHARGE")
        .map(|raw| parse_decimal("QUARRYQUOTE_SURCHARGE", &raw))
        .transpose()?;

    let default_tons = parse_decimal(
        "QUARRYQUOTE_DEFAULT_TONS",
        &or_default("QUARRYQUOTE_DEFAULT_TONS", "25"),
    )?;
    if default_tons.is_zero() {
        return Err(ConfigError::InvalidEnvVar {
            var: "QUARRYQUOTE_DEFAULT_TONS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_path,
        price_sheet_path,
        hourly_rate,
        minimum_rate,
        surcharge,
        default_tons,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
