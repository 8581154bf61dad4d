//! The [`PricedItem`] seam shared by price-sheet products and catalog
//! materials, so one optimizer serves both sources.

use std::borrow::Cow;

use quarryquote_core::{CatalogEntry, PriceTier, Product, ProductRef};
use rust_decimal::Decimal;

/// Anything the quote optimizer can price.
pub trait PricedItem {
    /// Stable reference carried into quotes.
    fn product_ref(&self) -> ProductRef;

    /// Catalog id used by forced-material requests, if the item has one.
    fn material_id(&self) -> Option<i64>;

    /// Listed unit price per ton for the tier; `None` when unlisted.
    fn unit_price(&self, tier: PriceTier) -> Option<Decimal>;

    /// Listed delivery charge per ton, if any.
    fn delivery_cost_per_ton(&self) -> Option<Decimal> {
        None
    }

    /// Sales tax as a fraction of the pre-tax total.
    fn tax_rate(&self) -> Decimal {
        Decimal::ZERO
    }

    /// Key into the distance index; `None` when the item has no known quarry.
    fn quarry_id(&self) -> Option<Cow<'_, str>>;
}

impl PricedItem for CatalogEntry {
    fn product_ref(&self) -> ProductRef {
        ProductRef {
            id: Some(self.id),
            name: self.name.clone(),
        }
    }

    fn material_id(&self) -> Option<i64> {
        Some(self.id)
    }

    /// Catalog materials carry a single price for every tier.
    fn unit_price(&self, _tier: PriceTier) -> Option<Decimal> {
        Some(self.price)
    }

    fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    fn quarry_id(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.quarry_id))
    }
}

impl PricedItem for Product {
    fn product_ref(&self) -> ProductRef {
        let name = match self.location_name.as_deref() {
            Some(location) => format!("{} ({location})", self.product_name),
            None => self.product_name.clone(),
        };
        ProductRef { id: None, name }
    }

    fn material_id(&self) -> Option<i64> {
        None
    }

    fn unit_price(&self, tier: PriceTier) -> Option<Decimal> {
        self.price_for(tier)
    }

    fn delivery_cost_per_ton(&self) -> Option<Decimal> {
        self.delivery_cost_per_ton
    }

    /// Price-sheet locations are routed as `Q_<location number>`.
    fn quarry_id(&self) -> Option<Cow<'_, str>> {
        self.location_number
            .as_deref()
            .map(|number| Cow::Owned(format!("Q_{number}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CatalogEntry {
        CatalogEntry {
            id: 16,
            name: "1 1/2\" Crusher Run (591-Mt Hope)".to_string(),
            quarry_id: "Q_591".to_string(),
            price: Decimal::new(1000, 2),
            tax_rate: Decimal::new(9, 2),
        }
    }

    fn product() -> Product {
        Product {
            location_name: Some("Cherokee".to_string()),
            location_type: Some("Rock Quarry".to_string()),
            location_number: Some("594".to_string()),
            address: String::new(),
            product_name: "#89 Stone".to_string(),
            price_non_account: Some(Decimal::new(2010, 2)),
            price_account: Some(Decimal::new(1910, 2)),
            delivery_cost_per_ton: Some(Decimal::new(250, 2)),
        }
    }

    #[test]
    fn catalog_entry_ignores_tier() {
        let e = entry();
        assert_eq!(e.unit_price(PriceTier::Account), e.unit_price(PriceTier::NonAccount));
        assert_eq!(e.tax_rate(), Decimal::new(9, 2));
        assert!(e.delivery_cost_per_ton().is_none());
        assert_eq!(e.quarry_id().as_deref(), Some("Q_591"));
        assert_eq!(e.material_id(), Some(16));
    }

    #[test]
    fn product_prices_by_tier_and_has_no_tax() {
        let p = product();
        assert_eq!(p.unit_price(PriceTier::Account), Some(Decimal::new(1910, 2)));
        assert_eq!(p.unit_price(PriceTier::NonAccount), Some(Decimal::new(2010, 2)));
        assert_eq!(p.tax_rate(), Decimal::ZERO);
        assert!(p.material_id().is_none());
    }

    #[test]
    fn product_routes_by_location_number() {
        let mut p = product();
        assert_eq!(p.quarry_id().as_deref(), Some("Q_594"));
        p.location_number = None;
        assert!(p.quarry_id().is_none());
    }

    #[test]
    fn product_ref_includes_location() {
        assert_eq!(product().product_ref().name, "#89 Stone (Cherokee)");
        assert_eq!(entry().product_ref().id, Some(16));
    }
}
