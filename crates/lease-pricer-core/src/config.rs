//! Process-wide pricing configuration.
//!
//! The annual nominal rate (RRSO) is fixed at startup from the `LEASE_RRSO`
//! environment variable. A missing, unparsable or non-positive value falls
//! back to [`DEFAULT_ANNUAL_RATE_PERCENT`] instead of failing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LeasePricerError;
use crate::types::Percent;
use crate::LeasePricerResult;

/// Environment variable holding the annual nominal rate in percent.
pub const ANNUAL_RATE_ENV: &str = "LEASE_RRSO";

/// Annual nominal rate used when the environment does not supply a usable one.
pub const DEFAULT_ANNUAL_RATE_PERCENT: Percent = dec!(8.5);

/// Pricing configuration shared by every evaluation in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricerConfig {
    /// Annual nominal rate in percent (8.5 = 8.5%)
    pub annual_rate_percent: Percent,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
        }
    }
}

impl PricerConfig {
    /// Build a config with an explicit rate. Non-positive rates are rejected.
    pub fn with_annual_rate(annual_rate_percent: Percent) -> LeasePricerResult<Self> {
        if annual_rate_percent <= Decimal::ZERO {
            return Err(LeasePricerError::InvalidConfiguration {
                key: "annual_rate_percent".into(),
                reason: format!("Annual rate must be positive, got {annual_rate_percent}"),
            });
        }
        Ok(Self { annual_rate_percent })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let raw = std::env::var(ANNUAL_RATE_ENV).ok();
        Self {
            annual_rate_percent: parse_annual_rate(raw.as_deref()),
        }
    }
}

/// Resolve a raw annual-rate setting to a usable percentage.
pub fn parse_annual_rate(raw: Option<&str>) -> Percent {
    let Some(raw) = raw else {
        debug!(
            default = %DEFAULT_ANNUAL_RATE_PERCENT,
            "{ANNUAL_RATE_ENV} not set, using default annual rate"
        );
        return DEFAULT_ANNUAL_RATE_PERCENT;
    };

    match raw.trim().parse::<Decimal>() {
        Ok(rate) if rate > Decimal::ZERO => rate,
        Ok(rate) => {
            warn!(
                value = %rate,
                default = %DEFAULT_ANNUAL_RATE_PERCENT,
                "{ANNUAL_RATE_ENV} must be positive, using default annual rate"
            );
            DEFAULT_ANNUAL_RATE_PERCENT
        }
        Err(e) => {
            warn!(
                value = raw,
                error = %e,
                default = %DEFAULT_ANNUAL_RATE_PERCENT,
                "{ANNUAL_RATE_ENV} is not a number, using default annual rate"
            );
            DEFAULT_ANNUAL_RATE_PERCENT
        }
    }
}
