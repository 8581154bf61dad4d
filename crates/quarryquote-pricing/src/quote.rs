//! Cost calculation and cheapest-option selection.
//!
//! Two contracts share one selection rule (lowest total wins, first seen
//! wins ties):
//!
//! - [`total_cost`] / [`find_cheapest`] price a load at the listed tier,
//!   optionally adding the listed delivery charge. No tax is applied.
//! - [`QuoteEngine`] prices a load delivered to a named destination, with a
//!   haul charge derived from round-trip time and tax applied on top.

use std::str::FromStr;

use quarryquote_core::{DistanceIndex, PriceTier, Quote};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::PricingError;
use crate::haul::HaulRates;
use crate::priced::PricedItem;

/// Rounds a monetary amount to cents, halves away from zero.
///
/// Calculations stay exact; call this only when reporting.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Total cost of `tons` of `item` at the price listed for `tier`.
///
/// With `include_delivery`, the listed delivery charge is added to the unit
/// price; an unlisted delivery charge adds nothing. Returns `None` when the
/// item has no price for the tier, or when the total is outside the range of
/// [`Decimal`].
#[must_use]
pub fn total_cost<T: PricedItem + ?Sized>(
    item: &T,
    tons: Decimal,
    tier: PriceTier,
    include_delivery: bool,
) -> Option<Decimal> {
    let mut unit = item.unit_price(tier)?;
    if include_delivery {
        if let Some(delivery) = item.delivery_cost_per_ton() {
            unit = unit.checked_add(delivery)?;
        }
    }

    let total = unit.checked_mul(tons);
    if total.is_none() {
        tracing::warn!(
            product = %item.product_ref().name,
            %tons,
            "total cost overflowed; excluding candidate"
        );
    }
    total
}

/// The item with the lowest [`total_cost`], with that cost.
///
/// Items without a price for the tier are skipped. `None` when nothing
/// qualifies.
#[must_use]
pub fn find_cheapest<T: PricedItem>(
    items: &[T],
    tons: Decimal,
    tier: PriceTier,
    include_delivery: bool,
) -> Option<(&T, Decimal)> {
    let mut best: Option<(&T, Decimal)> = None;
    for item in items {
        let Some(cost) = total_cost(item, tons, tier, include_delivery) else {
            continue;
        };
        if best.is_none_or(|(_, lowest)| cost < lowest) {
            best = Some((item, cost));
        }
    }
    best
}

/// Which materials a destination quote may choose from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaterialSelection {
    /// Every candidate competes on total price.
    #[default]
    Auto,
    /// Only the material with this catalog id is quoted.
    Forced(i64),
}

impl FromStr for MaterialSelection {
    type Err = PricingError;

    /// Accepts `AUTO` in any case, or an integer catalog id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        trimmed
            .parse::<i64>()
            .map(Self::Forced)
            .map_err(|_| PricingError::InvalidMaterialId(s.to_string()))
    }
}

/// A request for the best delivered price to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub destination_id: String,
    pub tons: Decimal,
    pub tier: PriceTier,
    pub selection: MaterialSelection,
}

/// Delivered-price quoting against a fixed distance index and haul rates.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    routes: DistanceIndex,
    rates: HaulRates,
}

impl QuoteEngine {
    #[must_use]
    pub fn new(routes: DistanceIndex, rates: HaulRates) -> Self {
        Self { routes, rates }
    }

    #[must_use]
    pub fn routes(&self) -> &DistanceIndex {
        &self.routes
    }

    #[must_use]
    pub fn rates(&self) -> HaulRates {
        self.rates
    }

    /// Quotes one item to `destination_id`.
    ///
    /// `None` when the item has no price for the tier, no quarry, no known
    /// route to the destination, or a price outside the range of [`Decimal`].
    #[must_use]
    pub fn quote_item<T: PricedItem + ?Sized>(
        &self,
        item: &T,
        destination_id: &str,
        tons: Decimal,
        tier: PriceTier,
    ) -> Option<Quote> {
        let material_price = item.unit_price(tier)?;
        let quarry_id = item.quarry_id()?;
        let Some(rtt_minutes) = self.routes.rtt_minutes(&quarry_id, destination_id) else {
            tracing::debug!(
                quarry_id = %quarry_id,
                destination_id,
                "no known route; skipping"
            );
            return None;
        };

        let tax_rate = item.tax_rate();
        let priced = self
            .rates
            .haul_rate_per_ton(Decimal::from(rtt_minutes), tons)
            .and_then(|haul| {
                let total = material_price
                    .checked_add(haul)?
                    .checked_mul(tons)?
                    .checked_mul(Decimal::ONE.checked_add(tax_rate)?)?;
                Some((haul, total))
            });
        let Some((haul_rate_per_ton, total_job_price)) = priced else {
            tracing::warn!(
                quarry_id = %quarry_id,
                destination_id,
                %tons,
                "delivered price overflowed; skipping"
            );
            return None;
        };

        Some(Quote {
            product: item.product_ref(),
            rtt_minutes,
            tons,
            haul_rate_per_ton,
            material_price,
            tax_rate,
            total_job_price,
            breakdown: breakdown(material_price, haul_rate_per_ton, tons, tax_rate),
        })
    }

    /// The cheapest delivered quote among `items`.
    ///
    /// With [`MaterialSelection::Forced`], only items carrying that id are
    /// considered and the first one that can be quoted is returned. `None`
    /// means no quote is available.
    #[must_use]
    pub fn best_quote<T: PricedItem>(&self, items: &[T], request: &QuoteRequest) -> Option<Quote> {
        let quote = |item: &T| {
            self.quote_item(item, &request.destination_id, request.tons, request.tier)
        };

        if let MaterialSelection::Forced(id) = request.selection {
            return items
                .iter()
                .filter(|item| item.material_id() == Some(id))
                .find_map(quote);
        }

        let mut best: Option<Quote> = None;
        for candidate in items.iter().filter_map(quote) {
            if best
                .as_ref()
                .is_none_or(|b| candidate.total_job_price < b.total_job_price)
            {
                best = Some(candidate);
            }
        }
        best
    }
}

/// `"($14.00 Material + $9.00 Haul) x 25 Tons + 9% Tax"`
fn breakdown(material: Decimal, haul: Decimal, tons: Decimal, tax_rate: Decimal) -> String {
    format!(
        "(${:.2} Material + ${:.2} Haul) x {} Tons + {}% Tax",
        round_money(material),
        round_money(haul),
        tons.normalize(),
        (tax_rate * Decimal::ONE_HUNDRED).normalize(),
    )
}

#[cfg(test)]
#[path = "quote_test.rs"]
mod tests;
