use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use lease_pricer_core::config::PricerConfig;
use lease_pricer_core::format::DisplayQuote;
use lease_pricer_core::lease::{self, LeaseQuoteInput, LeaseRequest};
use lease_pricer_core::types::Percent;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Quote request from JavaScript. The rate is optional; without it the
/// process configuration (LEASE_RRSO or its default) applies.
#[derive(Deserialize)]
struct QuoteRequest {
    #[serde(flatten)]
    request: LeaseRequest,
    #[serde(default)]
    annual_rate_percent: Option<Percent>,
}

#[derive(Deserialize)]
struct BuyoutRequest {
    duration_months: u32,
    buyout_percent: Percent,
}

fn parse_quote_input(input_json: &str) -> NapiResult<LeaseQuoteInput> {
    let parsed: QuoteRequest = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let config = match parsed.annual_rate_percent {
        Some(rate) => PricerConfig::with_annual_rate(rate).map_err(to_napi_error)?,
        None => PricerConfig::from_env(),
    };
    Ok(LeaseQuoteInput::new(parsed.request, &config))
}

// ---------------------------------------------------------------------------
// Lease pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_lease(input_json: String) -> NapiResult<String> {
    let input = parse_quote_input(&input_json)?;
    let output = lease::quote_lease(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn display_quote(input_json: String) -> NapiResult<String> {
    let input = parse_quote_input(&input_json)?;
    let output = lease::quote_lease(&input).map_err(to_napi_error)?;
    serde_json::to_string(&DisplayQuote::from(&output.result)).map_err(to_napi_error)
}

#[napi]
pub fn validate_buyout(input_json: String) -> NapiResult<String> {
    let input: BuyoutRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let check = lease::check_buyout(input.duration_months, input.buyout_percent);
    serde_json::to_string(&check).map_err(to_napi_error)
}
