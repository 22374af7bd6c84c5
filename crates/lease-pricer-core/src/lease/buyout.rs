//! Permitted buyout (residual value) ranges by contract duration.
//!
//! Lenders cap the buyout percentage differently for each supported term.
//! Durations outside the table use [`DEFAULT_BUYOUT_RANGE`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// Inclusive range of permitted buyout percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutRange {
    pub min_percent: Percent,
    pub max_percent: Percent,
}

impl BuyoutRange {
    pub const fn new(min_percent: Percent, max_percent: Percent) -> Self {
        Self {
            min_percent,
            max_percent,
        }
    }

    pub fn contains(&self, buyout_percent: Percent) -> bool {
        self.min_percent <= buyout_percent && buyout_percent <= self.max_percent
    }
}

/// Range applied to any duration missing from [`BUYOUT_RULES`].
pub const DEFAULT_BUYOUT_RANGE: BuyoutRange = BuyoutRange::new(dec!(1), dec!(60));

/// Duration in months -> permitted buyout range.
pub const BUYOUT_RULES: &[(u32, BuyoutRange)] = &[
    (24, BuyoutRange::new(dec!(18), dec!(60))),
    (35, BuyoutRange::new(dec!(1), dec!(50))),
    (47, BuyoutRange::new(dec!(1), dec!(40))),
    (59, BuyoutRange::new(dec!(1), dec!(30))),
];

/// Range that applies to `duration_months`.
pub fn buyout_range(duration_months: u32) -> BuyoutRange {
    BUYOUT_RULES
        .iter()
        .find(|(months, _)| *months == duration_months)
        .map(|(_, range)| *range)
        .unwrap_or(DEFAULT_BUYOUT_RANGE)
}

/// Whether `buyout_percent` is permitted for `duration_months`.
pub fn validate_buyout(duration_months: u32, buyout_percent: Decimal) -> bool {
    buyout_range(duration_months).contains(buyout_percent)
}

/// Buyout verdict together with the range it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutCheck {
    pub duration_months: u32,
    pub buyout_percent: Percent,
    pub valid: bool,
    pub range: BuyoutRange,
    /// False when the duration is not in the table and the default range applied
    pub rule_found: bool,
}

pub fn check_buyout(duration_months: u32, buyout_percent: Percent) -> BuyoutCheck {
    let range = buyout_range(duration_months);
    BuyoutCheck {
        duration_months,
        buyout_percent,
        valid: range.contains(buyout_percent),
        range,
        rule_found: BUYOUT_RULES.iter().any(|(months, _)| *months == duration_months),
    }
}
