use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies the priced item a quote was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Catalog id, when the item came from the catalog.
    pub id: Option<i64>,
    pub name: String,
}

/// A delivered-price quote for one material to one destination.
///
/// Amounts are exact; rounding for display happens at the reporting edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub product: ProductRef,
    pub rtt_minutes: u32,
    pub tons: Decimal,
    pub haul_rate_per_ton: Decimal,
    pub material_price: Decimal,
    pub tax_rate: Decimal,
    pub total_job_price: Decimal,
    /// Human-readable summary, e.g.
    /// `"($14.00 Material + $9.00 Haul) x 25 Tons + 9% Tax"`.
    pub breakdown: String,
}
