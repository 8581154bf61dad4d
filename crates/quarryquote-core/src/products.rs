use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which listed unit price applies to a buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Walk-in pricing.
    NonAccount,
    /// Pricing for customers holding an account.
    Account,
}

impl PriceTier {
    #[must_use]
    pub fn for_account_holder(is_account_holder: bool) -> Self {
        if is_account_holder {
            PriceTier::Account
        } else {
            PriceTier::NonAccount
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTier::NonAccount => write!(f, "non-account"),
            PriceTier::Account => write!(f, "account"),
        }
    }
}

/// A row of a quarry price sheet after normalization.
///
/// Every price is either a non-negative exact decimal or `None` ("CALL",
/// "N/A", blank, or unparsable in the source). Any configured surcharge has
/// already been added to `price_non_account` and `price_account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// First `/` segment of the location descriptor, e.g. `"Cherokee"`.
    pub location_name: Option<String>,
    /// Second segment, e.g. `"Rock Quarry"`.
    pub location_type: Option<String>,
    /// Third segment, e.g. `"594"`. Kept as text; compared exactly.
    pub location_number: Option<String>,
    pub address: String,
    pub product_name: String,
    pub price_non_account: Option<Decimal>,
    pub price_account: Option<Decimal>,
    pub delivery_cost_per_ton: Option<Decimal>,
}

impl Product {
    /// Listed unit price for the given tier.
    #[must_use]
    pub fn price_for(&self, tier: PriceTier) -> Option<Decimal> {
        match tier {
            PriceTier::NonAccount => self.price_non_account,
            PriceTier::Account => self.price_account,
        }
    }

    /// The location descriptor re-assembled from its parts, e.g.
    /// `"Cherokee/Rock Quarry/594"`. Trailing absent parts are dropped; with
    /// every part absent the descriptor is a bare `/`, never blank.
    #[must_use]
    pub fn location_descriptor(&self) -> String {
        let mut parts: Vec<&str> = [
            self.location_name.as_deref(),
            self.location_type.as_deref(),
            self.location_number.as_deref(),
        ]
        .into_iter()
        .map(|p| p.unwrap_or(""))
        .collect();
        while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        if parts == [""] {
            return "/".to_string();
        }
        parts.join("/")
    }
}
