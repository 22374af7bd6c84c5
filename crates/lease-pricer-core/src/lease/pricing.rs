//! Finance-lease installment pricing.
//!
//! The financed principal is the price net of the down payment and the
//! buyout. A non-symbolic buyout (above 1%) is carried by the lessor for the
//! whole term, so simple interest on it over the term is added to the
//! principal before it is amortized with a level annuity at the effective
//! monthly rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::buyout::{buyout_range, BuyoutRange};
use crate::config::PricerConfig;
use crate::error::{overflow, LeasePricerError};
use crate::format::DisplayQuote;
use crate::time_value::{annuity_payment, effective_monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::LeasePricerResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Contract durations offered on the control surface.
pub const SUPPORTED_DURATIONS: [u32; 4] = [24, 35, 47, 59];

/// Buyouts at or below this percentage are not separately financed.
pub const BUYOUT_INTEREST_THRESHOLD: Percent = dec!(1);

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Parameters of a single lease evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseRequest {
    /// Gross asset price
    pub price: Money,
    /// Down payment as a percentage of price
    pub initial_percent: Percent,
    /// Contract duration in months
    pub duration_months: u32,
    /// Residual buyout value as a percentage of price
    pub buyout_percent: Percent,
}

/// A lease request priced at an explicit annual rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseQuoteInput {
    #[serde(flatten)]
    pub request: LeaseRequest,
    /// Annual nominal rate in percent (8.5 = 8.5%)
    pub annual_rate_percent: Percent,
}

impl LeaseQuoteInput {
    pub fn new(request: LeaseRequest, config: &PricerConfig) -> Self {
        Self {
            request,
            annual_rate_percent: config.annual_rate_percent,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The three values shown to the lessee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseResult {
    /// Level monthly installment
    pub monthly_installment: Money,
    /// Installments plus down payment plus buyout
    pub total_cost: Money,
    /// Total cost as a percentage of price
    pub cost_ratio_percent: Percent,
}

/// Intermediate quantities of the installment calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseBreakdown {
    pub monthly_rate: Rate,
    pub initial_payment: Money,
    pub buyout_value: Money,
    pub financed_amount: Money,
    pub buyout_interest: Money,
    pub total_financed: Money,
}

/// Full quote: result, breakdown and buyout verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseQuote {
    pub result: LeaseResult,
    pub breakdown: LeaseBreakdown,
    pub buyout_within_range: bool,
    pub buyout_range: BuyoutRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyout_warning: Option<String>,
}

impl From<&LeaseQuote> for DisplayQuote {
    fn from(quote: &LeaseQuote) -> Self {
        DisplayQuote::new(
            quote.result.monthly_installment,
            quote.result.total_cost,
            quote.result.cost_ratio_percent,
            quote.buyout_warning.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly installment, total cost and cost ratio for a lease.
pub fn compute(request: &LeaseRequest, annual_rate_percent: Percent) -> LeasePricerResult<LeaseResult> {
    compute_breakdown(request, annual_rate_percent).map(|(result, _)| result)
}

/// Same as [`compute`], also returning the intermediate quantities.
pub fn compute_breakdown(
    request: &LeaseRequest,
    annual_rate_percent: Percent,
) -> LeasePricerResult<(LeaseResult, LeaseBreakdown)> {
    validate_request(request)?;

    let monthly_rate = effective_monthly_rate(annual_rate_percent)?;
    if monthly_rate.is_zero() {
        return Err(LeasePricerError::DivisionByZero {
            context: "installment at zero monthly rate".into(),
        });
    }

    let price = request.price;
    let months = Decimal::from(request.duration_months);

    let initial_payment = percent_of(price, request.initial_percent, "initial payment")?;
    let buyout_value = percent_of(price, request.buyout_percent, "buyout value")?;
    let financed_amount = price - initial_payment - buyout_value;

    let buyout_interest = if request.buyout_percent > BUYOUT_INTEREST_THRESHOLD {
        (buyout_value * monthly_rate)
            .checked_mul(months)
            .ok_or_else(|| overflow("buyout interest"))?
    } else {
        Decimal::ZERO
    };
    let total_financed = financed_amount
        .checked_add(buyout_interest)
        .ok_or_else(|| overflow("total financed"))?;

    let monthly_installment = annuity_payment(monthly_rate, request.duration_months, total_financed)?;
    let total_cost = monthly_installment
        .checked_mul(months)
        .and_then(|v| v.checked_add(initial_payment))
        .and_then(|v| v.checked_add(buyout_value))
        .ok_or_else(|| overflow("total cost"))?;
    let cost_ratio_percent = (total_cost / price)
        .checked_mul(HUNDRED)
        .ok_or_else(|| overflow("cost ratio"))?;

    Ok((
        LeaseResult {
            monthly_installment,
            total_cost,
            cost_ratio_percent,
        },
        LeaseBreakdown {
            monthly_rate,
            initial_payment,
            buyout_value,
            financed_amount,
            buyout_interest,
            total_financed,
        },
    ))
}

/// Price a lease and check its buyout, wrapped in the computation envelope.
///
/// An out-of-range buyout, a duration outside [`SUPPORTED_DURATIONS`] and a
/// negative financed amount are reported as warnings; pricing still runs.
pub fn quote_lease(input: &LeaseQuoteInput) -> LeasePricerResult<ComputationOutput<LeaseQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let request = &input.request;

    let (result, breakdown) = compute_breakdown(request, input.annual_rate_percent)?;

    let range = buyout_range(request.duration_months);
    let buyout_within_range = range.contains(request.buyout_percent);
    let buyout_warning = if buyout_within_range {
        None
    } else {
        Some(format!(
            "Buyout value {}% outside permitted range [{}%, {}%] for {}-month term",
            request.buyout_percent.normalize(),
            range.min_percent,
            range.max_percent,
            request.duration_months
        ))
    };
    if let Some(w) = &buyout_warning {
        warnings.push(w.clone());
    }

    if !SUPPORTED_DURATIONS.contains(&request.duration_months) {
        warnings.push(format!(
            "Duration of {} months is not one of the offered terms {:?}",
            request.duration_months, SUPPORTED_DURATIONS
        ));
    }
    if breakdown.financed_amount < Decimal::ZERO {
        warnings.push(format!(
            "Down payment and buyout exceed the price; financed amount is {}",
            breakdown.financed_amount.round_dp(2)
        ));
    }

    let quote = LeaseQuote {
        result,
        breakdown,
        buyout_within_range,
        buyout_range: range,
        buyout_warning,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Level annuity at effective monthly rate with simple interest on financed buyout",
        input,
        warnings,
        elapsed,
        quote,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_request(request: &LeaseRequest) -> LeasePricerResult<()> {
    if request.price <= Decimal::ZERO {
        return Err(LeasePricerError::InvalidInput {
            field: "price".into(),
            reason: "Price must be positive".into(),
        });
    }
    validate_percent("initial_percent", request.initial_percent)?;
    validate_percent("buyout_percent", request.buyout_percent)?;
    if request.duration_months == 0 {
        return Err(LeasePricerError::DivisionByZero {
            context: "installment over a zero-month term".into(),
        });
    }
    Ok(())
}

fn percent_of(price: Money, percent: Percent, context: &str) -> LeasePricerResult<Money> {
    price
        .checked_mul(percent)
        .map(|v| v / HUNDRED)
        .ok_or_else(|| overflow(context))
}

fn validate_percent(field: &str, value: Percent) -> LeasePricerResult<()> {
    if value < Decimal::ZERO || value > HUNDRED {
        return Err(LeasePricerError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between 0 and 100, got {value}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
