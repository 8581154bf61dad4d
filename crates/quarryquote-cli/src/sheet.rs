//! Price-sheet command handlers: `cheapest` and `products`.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use quarryquote_core::{PriceTier, Product};
use quarryquote_pricing::{
    filter_products, find_cheapest, read_price_sheet, write_price_sheet, LocationFilter,
    PriceNormalizer,
};
use rust_decimal::Decimal;

const NO_MATCH: &str = "No suitable product found with the specified criteria.";

/// Location filters shared by the price-sheet commands.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct LocationArgs {
    /// Only products at this location name, e.g. `Cherokee` (case-insensitive)
    #[arg(long)]
    pub location_name: Option<String>,
    /// Only products at this location number, e.g. `594`
    #[arg(long)]
    pub location_number: Option<String>,
}

impl LocationArgs {
    fn filter(&self) -> LocationFilter<'_> {
        LocationFilter {
            location_name: self.location_name.as_deref(),
            location_number: self.location_number.as_deref(),
        }
    }
}

/// Surcharge flags shared by the price-sheet commands.
#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct SurchargeArgs {
    /// Flat amount added to every listed price
    #[arg(long, default_value = "0.10", conflicts_with = "no_surcharge")]
    pub surcharge: Decimal,
    /// Use listed prices without a surcharge
    #[arg(long)]
    pub no_surcharge: bool,
}

impl SurchargeArgs {
    fn resolve(self) -> Option<Decimal> {
        if self.no_surcharge {
            None
        } else {
            Some(self.surcharge)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CheapestOptions {
    pub tier: PriceTier,
    pub include_delivery: bool,
    pub tons: Decimal,
}

/// Reads the sheet at `file`. A sheet that cannot be read or yields no
/// products is an error.
fn load_products(file: &Path, surcharge: SurchargeArgs) -> anyhow::Result<Vec<Product>> {
    let normalizer = PriceNormalizer::new(surcharge.resolve())?;
    let products = read_price_sheet(file, &normalizer)?;
    if products.is_empty() {
        anyhow::bail!("could not read any products from {}", file.display());
    }
    tracing::debug!(count = products.len(), file = %file.display(), "price sheet loaded");
    Ok(products)
}

/// Print the cheapest product on the sheet for the given options.
///
/// # Errors
///
/// Returns an error if the surcharge is negative or the sheet yields no
/// products. Finding no match after filtering is not an error.
pub(crate) fn run_cheapest(
    file: &Path,
    location: &LocationArgs,
    surcharge: SurchargeArgs,
    options: CheapestOptions,
) -> anyhow::Result<()> {
    let products = load_products(file, surcharge)?;
    let candidates = filter_products(&products, location.filter());

    match find_cheapest(&candidates, options.tons, options.tier, options.include_delivery) {
        Some((product, cost)) => print!("{}", render_cheapest(product, cost, options.tons)),
        None => println!("{NO_MATCH}"),
    }
    Ok(())
}

/// Print the normalized products on the sheet, as a table or as CSV.
///
/// # Errors
///
/// Returns an error if the sheet yields no products or stdout cannot be
/// written.
pub(crate) fn run_products(
    file: &Path,
    location: &LocationArgs,
    surcharge: SurchargeArgs,
    csv: bool,
) -> anyhow::Result<()> {
    let products = filter_products(&load_products(file, surcharge)?, location.filter());

    if csv {
        write_price_sheet(std::io::stdout().lock(), &products)
            .context("writing price sheet to stdout")?;
        return Ok(());
    }

    if products.is_empty() {
        println!("{NO_MATCH}");
        return Ok(());
    }
    print!("{}", render_products_table(&products));
    Ok(())
}

fn render_cheapest(product: &Product, cost: Decimal, tons: Decimal) -> String {
    let name = product.location_name.as_deref().unwrap_or("unknown");
    let location = match product.location_number.as_deref() {
        Some(number) => format!("{name} ({number})"),
        None => name.to_string(),
    };

    format!(
        "--- Cheapest Option Found ---\n  \
         Product:      {}\n  \
         Location:     {location}\n  \
         Address:      {}\n  \
         Total Cost:   {} for {} tons\n",
        product.product_name,
        product.address,
        crate::fmt_money(cost),
        tons.normalize()
    )
}

fn render_products_table(products: &[Product]) -> String {
    let header = format!(
        "{:<20}{:<8}{:<24}{:>13}{:>13}{:>11}",
        "LOCATION", "NUMBER", "PRODUCT", "NON-ACCOUNT", "ACCOUNT", "DELIVERY"
    );
    let rows = products.iter().map(|product| {
        format!(
            "{:<20}{:<8}{:<24}{:>13}{:>13}{:>11}",
            product.location_name.as_deref().unwrap_or("\u{2014}"),
            product.location_number.as_deref().unwrap_or("\u{2014}"),
            product.product_name,
            crate::fmt_optional_money(product.price_non_account),
            crate::fmt_optional_money(product.price_account),
            crate::fmt_optional_money(product.delivery_cost_per_ton),
        )
    });

    let mut lines = vec![header];
    lines.extend(rows);
    lines.push(String::new());
    lines.join("\n")
}
