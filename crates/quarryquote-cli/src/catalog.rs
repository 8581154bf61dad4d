//! Catalog command handlers: `quote` and `catalog`.

use quarryquote_core::{catalog_from_config, AppConfig, Catalog, PriceTier, Quote};
use quarryquote_pricing::{
    HaulRates, MaterialSelection, PriceNormalizer, QuoteEngine, QuoteRequest,
};
use rust_decimal::Decimal;

/// Catalog with the configured surcharge applied.
fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let normalizer = PriceNormalizer::new(config.surcharge)?;
    Ok(normalizer.normalize_catalog(&catalog_from_config(config)?))
}

/// Print the best delivered quote for `destination`.
///
/// # Errors
///
/// Returns an error if the configured catalog cannot be loaded. No quote
/// being available is reported, not returned as an error.
pub(crate) fn run_quote(
    config: &AppConfig,
    destination: &str,
    tons: Decimal,
    selection: MaterialSelection,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    let engine = QuoteEngine::new(catalog.routes.clone(), HaulRates::from_app_config(config));
    let request = QuoteRequest {
        destination_id: destination.to_string(),
        tons,
        tier: PriceTier::NonAccount,
        selection,
    };

    match engine.best_quote(&catalog.materials, &request) {
        Some(quote) => print!("{}", render_quote(destination, &quote)),
        None => println!("No quote available for {destination}."),
    }
    Ok(())
}

/// Print catalog materials and the destinations they can be quoted to.
///
/// # Errors
///
/// Returns an error if the configured catalog cannot be loaded.
pub(crate) fn run_catalog(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config)?;
    print!("{}", render_catalog(&catalog));
    Ok(())
}

fn render_quote(destination: &str, quote: &Quote) -> String {
    let material = match quote.product.id {
        Some(id) => format!("{} (#{id})", quote.product.name),
        None => quote.product.name.clone(),
    };

    format!(
        "--- Best Delivered Quote ---\n  \
         Destination:  {destination}\n  \
         Material:     {material}\n  \
         Round Trip:   {} min\n  \
         Breakdown:    {}\n  \
         Total:        {}\n",
        quote.rtt_minutes,
        quote.breakdown,
        crate::fmt_money(quote.total_job_price)
    )
}

fn render_catalog(catalog: &Catalog) -> String {
    let mut lines = vec![format!(
        "{:<5}{:<40}{:<10}{:>9}{:>7}",
        "ID", "MATERIAL", "QUARRY", "PRICE", "TAX"
    )];
    lines.extend(catalog.materials.iter().map(|m| {
        format!(
            "{:<5}{:<40}{:<10}{:>9}{:>6}%",
            m.id,
            m.name,
            m.quarry_id,
            crate::fmt_money(m.price),
            (m.tax_rate * Decimal::ONE_HUNDRED).normalize()
        )
    }));
    lines.push(String::new());
    lines.push(format!("Destinations: {}", catalog.routes.destinations().join(", ")));
    lines.push(String::new());
    lines.join("\n")
}
