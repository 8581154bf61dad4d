mod catalog;
mod sheet;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quarryquote_pricing::{round_money, MaterialSelection};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use crate::sheet::{LocationArgs, SurchargeArgs};

#[derive(Debug, Parser)]
#[command(name = "quarryquote-cli")]
#[command(about = "Aggregate price sheets and delivered-price quotes")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find the cheapest product on a price sheet
    Cheapest {
        /// Path to the price-sheet CSV file
        file: PathBuf,
        #[command(flatten)]
        location: LocationArgs,
        /// Price with account-holder rates
        #[arg(long)]
        account_holder: bool,
        /// Add the listed delivery cost per ton
        #[arg(long)]
        include_delivery: bool,
        /// Tons to price (defaults to `QUARRYQUOTE_DEFAULT_TONS`)
        #[arg(long)]
        tons: Option<Decimal>,
        #[command(flatten)]
        surcharge: SurchargeArgs,
    },
    /// List the normalized products on a price sheet
    Products {
        /// Path to the price-sheet CSV file
        file: PathBuf,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        surcharge: SurchargeArgs,
        /// Write the normalized sheet as CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Quote the best delivered price to a destination
    Quote {
        /// Destination id (e.g., `D_HSV_AVIA`)
        #[arg(long)]
        destination: String,
        /// Tons to deliver
        #[arg(long)]
        tons: Decimal,
        /// `AUTO` or a catalog material id
        #[arg(long, default_value = "AUTO")]
        material_id: MaterialSelection,
    },
    /// List catalog materials and known destinations
    Catalog,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = quarryquote_core::load_app_config_from_env()?;

    let fallback = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Cheapest {
            file,
            location,
            account_holder,
            include_delivery,
            tons,
            surcharge,
        } => {
            let tons = resolve_tons(tons, config.default_tons)?;
            sheet::run_cheapest(
                &file,
                &location,
                surcharge,
                sheet::CheapestOptions {
                    tier: quarryquote_core::PriceTier::for_account_holder(account_holder),
                    include_delivery,
                    tons,
                },
            )?;
        }
        Commands::Products {
            file,
            location,
            surcharge,
            csv,
        } => sheet::run_products(&file, &location, surcharge, csv)?,
        Commands::Quote {
            destination,
            tons,
            material_id,
        } => {
            let tons = resolve_tons(Some(tons), config.default_tons)?;
            catalog::run_quote(&config, &destination, tons, material_id)?;
        }
        Commands::Catalog => catalog::run_catalog(&config)?,
    }

    Ok(())
}

/// Uses `requested` tons when given, else `default`. Tonnage must be positive.
fn resolve_tons(requested: Option<Decimal>, default: Decimal) -> anyhow::Result<Decimal> {
    let tons = requested.unwrap_or(default);
    if tons <= Decimal::ZERO {
        anyhow::bail!("tons must be greater than zero, got {tons}");
    }
    Ok(tons)
}

/// Format an amount as dollars and cents.
fn fmt_money(amount: Decimal) -> String {
    format!("${:.2}", round_money(amount))
}

/// Format an optional amount, returning `"—"` when `None`.
fn fmt_optional_money(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| "\u{2014}".to_string(), fmt_money)
}

#[cfg(test)]
mod tests;
