use quarryquote_core::AppConfig;
use rust_decimal::Decimal;

const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(130, 0, 0, false, 0);
const DEFAULT_MINIMUM_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 0);
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Trucking rates used to turn round-trip time into a per-ton haul charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaulRates {
    pub hourly_rate: Decimal,
    pub minimum_rate: Decimal,
}

impl Default for HaulRates {
    fn default() -> Self {
        Self {
            hourly_rate: DEFAULT_HOURLY_RATE,
            minimum_rate: DEFAULT_MINIMUM_RATE,
        }
    }
}

impl HaulRates {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            hourly_rate: config.hourly_rate,
            minimum_rate: config.minimum_rate,
        }
    }

    /// Per-ton haul charge for a load of `tons` taking `rtt_minutes` round trip.
    ///
    /// Degenerate inputs (zero or negative time or tonnage) get the minimum
    /// rate. Otherwise `hourly_rate / 60 * minutes / tons`, floored at the
    /// minimum and rounded up to the next half unit.
    ///
    /// `None` when the charge is outside the range of [`Decimal`], which
    /// happens only for extreme tonnages.
    #[must_use]
    pub fn haul_rate_per_ton(&self, rtt_minutes: Decimal, tons: Decimal) -> Option<Decimal> {
        if rtt_minutes <= Decimal::ZERO || tons <= Decimal::ZERO {
            return Some(self.minimum_rate);
        }

        let hourly_minutes = self.hourly_rate.checked_mul(rtt_minutes)?;
        let Some(ton_minutes) = MINUTES_PER_HOUR.checked_mul(tons) else {
            // Enough tons that the per-ton share of any trip is negligible.
            return Some(self.minimum_rate);
        };
        let raw = hourly_minutes.checked_div(ton_minutes)?;
        if raw <= self.minimum_rate {
            return Some(self.minimum_rate);
        }

        let doubled = raw.checked_mul(Decimal::TWO)?.ceil();
        doubled.checked_div(Decimal::TWO)
    }
}
