//! Normalization from raw price-sheet rows to [`quarryquote_core::Product`].
//!
//! Cell-level parsing is delegated to [`crate::parse`]; this module owns the
//! row shape, the skip rule, and surcharge application.

use quarryquote_core::{Catalog, CatalogEntry, Product};
use rust_decimal::Decimal;

use crate::error::PricingError;
use crate::parse::{clean_price, split_location, CleanedPrice};

/// One price-sheet row as six positional text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPriceRow {
    /// `"Name/Type/Number"`, e.g. `"Cherokee/Rock Quarry/594"`.
    pub location: String,
    pub address: String,
    pub product: String,
    pub price_non_account: String,
    pub price_account: String,
    pub delivery_cost: String,
}

impl RawPriceRow {
    /// Builds a row from positional cells. Missing trailing cells are blank
    /// and cells past the sixth are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = fields.into_iter().map(ToOwned::to_owned);
        let mut next = || cells.next().unwrap_or_default();
        Self {
            location: next(),
            address: next(),
            product: next(),
            price_non_account: next(),
            price_account: next(),
            delivery_cost: next(),
        }
    }

    /// Renders a normalized product back into sheet cells.
    ///
    /// Unlisted prices become `CALL` and an unlisted delivery cost becomes
    /// `N/A`, so re-normalizing without a surcharge yields the same product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let price = |p: Option<Decimal>| p.map_or_else(|| "CALL".to_string(), |d| d.to_string());
        Self {
            location: product.location_descriptor(),
            address: product.address.clone(),
            product: product.product_name.clone(),
            price_non_account: price(product.price_non_account),
            price_account: price(product.price_account),
            delivery_cost: product
                .delivery_cost_per_ton
                .map_or_else(|| "N/A".to_string(), |d| d.to_string()),
        }
    }

    /// Cells in sheet column order.
    #[must_use]
    pub fn fields(&self) -> [&str; 6] {
        [
            self.location.as_str(),
            self.address.as_str(),
            self.product.as_str(),
            self.price_non_account.as_str(),
            self.price_account.as_str(),
            self.delivery_cost.as_str(),
        ]
    }

    /// A row carries no usable data when it has no location, or when the
    /// product and all three price cells are blank.
    fn is_unusable(&self) -> bool {
        let blank = |s: &str| s.trim().is_empty();
        blank(&self.location)
            || (blank(&self.product)
                && blank(&self.price_non_account)
                && blank(&self.price_account)
                && blank(&self.delivery_cost))
    }
}

/// Turns raw rows into validated [`Product`] values, adding a flat surcharge
/// to listed prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceNormalizer {
    surcharge: Option<Decimal>,
}

impl PriceNormalizer {
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeSurcharge`] if `surcharge` is below zero.
    pub fn new(surcharge: Option<Decimal>) -> Result<Self, PricingError> {
        match surcharge {
            Some(amount) if amount.is_sign_negative() => {
                Err(PricingError::NegativeSurcharge(amount))
            }
            _ => Ok(Self { surcharge }),
        }
    }

    #[must_use]
    pub fn surcharge(&self) -> Option<Decimal> {
        self.surcharge
    }

    /// Normalizes one row, or returns `None` when the row carries no usable
    /// data. Bad price cells are logged and become `None`; they never drop
    /// the row.
    #[must_use]
    pub fn normalize_row(&self, row: &RawPriceRow) -> Option<Product> {
        if row.is_unusable() {
            tracing::debug!(location = %row.location, "skipping price row with no usable data");
            return None;
        }

        let (location_name, location_type, location_number) = split_location(&row.location);

        let price_non_account = parse_cell("price_non_account", &row.price_non_account)
            .and_then(|p| self.surcharged_cell("price_non_account", p));
        let price_account = parse_cell("price_account", &row.price_account)
            .and_then(|p| self.surcharged_cell("price_account", p));
        let delivery_cost_per_ton = parse_cell("delivery_cost", &row.delivery_cost);

        Some(Product {
            location_name,
            location_type,
            location_number,
            address: row.address.trim().to_string(),
            product_name: row.product.trim().to_string(),
            price_non_account,
            price_account,
            delivery_cost_per_ton,
        })
    }

    /// Applies the surcharge to a pre-validated catalog entry.
    #[must_use]
    pub fn normalize_entry(&self, entry: &CatalogEntry) -> CatalogEntry {
        CatalogEntry {
            price: self
                .surcharge
                .map_or(entry.price, |s| entry.price.saturating_add(s)),
            ..entry.clone()
        }
    }

    /// Applies the surcharge to every material; routes are unchanged.
    #[must_use]
    pub fn normalize_catalog(&self, catalog: &Catalog) -> Catalog {
        Catalog {
            materials: catalog
                .materials
                .iter()
                .map(|m| self.normalize_entry(m))
                .collect(),
            routes: catalog.routes.clone(),
        }
    }

    fn surcharged_cell(&self, field: &'static str, price: Decimal) -> Option<Decimal> {
        let Some(surcharge) = self.surcharge else {
            return Some(price);
        };
        let surcharged = price.checked_add(surcharge);
        if surcharged.is_none() {
            tracing::warn!(field, %price, "price too large to surcharge");
        }
        surcharged
    }
}

fn parse_cell(field: &'static str, raw: &str) -> Option<Decimal> {
    match clean_price(raw) {
        CleanedPrice::Amount(value) => Some(value),
        CleanedPrice::Unlisted => None,
        CleanedPrice::Unparsable => {
            tracing::warn!(field, raw = %raw, "could not parse price string to decimal");
            None
        }
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
