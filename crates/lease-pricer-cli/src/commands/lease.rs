use clap::Args;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

use lease_pricer_core::config::PricerConfig;
use lease_pricer_core::format::DisplayQuote;
use lease_pricer_core::lease::{
    self, BuyoutRange, LeaseQuoteInput, LeaseRequest, BUYOUT_RULES, DEFAULT_BUYOUT_RANGE,
    SUPPORTED_DURATIONS,
};
use lease_pricer_core::types::with_metadata;

use crate::input;

/// Arguments for a lease quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to JSON request file (price, initial_percent, duration_months, buyout_percent)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross asset price
    #[arg(long, default_value = "220000")]
    pub price: Decimal,

    /// Down payment as a percentage of price
    #[arg(long, default_value = "20")]
    pub initial: Decimal,

    /// Contract term in months: 24, 35, 47 or 59
    #[arg(long, default_value_t = 35, value_parser = parse_supported_duration)]
    pub months: u32,

    /// Buyout (residual value) as a percentage of price
    #[arg(long, default_value = "10")]
    pub buyout: Decimal,

    /// Annual nominal rate in percent; overrides LEASE_RRSO
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Skip clamping inputs to the calculator's slider ranges
    #[arg(long)]
    pub no_clamp: bool,
}

/// Arguments for a buyout range check
#[derive(Args)]
pub struct ValidateBuyoutArgs {
    /// Contract term in months (terms without a rule use the default range)
    #[arg(long)]
    pub months: u32,

    /// Buyout as a percentage of price
    #[arg(long)]
    pub buyout: Decimal,
}

#[derive(Debug, Serialize)]
struct BuyoutRuleRow {
    duration_months: String,
    min_percent: Decimal,
    max_percent: Decimal,
}

/// A slider on the calculator: values are clamped to [min, max] and snapped
/// to the nearest step counted from min.
#[derive(Debug, Clone, Copy)]
struct SliderRange {
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

const PRICE_SLIDER: SliderRange = SliderRange {
    min: dec!(100000),
    max: dec!(500000),
    step: dec!(1000),
};

const INITIAL_SLIDER: SliderRange = SliderRange {
    min: dec!(0),
    max: dec!(45),
    step: dec!(1),
};

const BUYOUT_SLIDER: SliderRange = SliderRange {
    min: dec!(1),
    max: dec!(60),
    step: dec!(1),
};

impl SliderRange {
    fn snap(&self, value: Decimal) -> Decimal {
        let clamped = value.max(self.min).min(self.max);
        let steps = ((clamped - self.min) / self.step)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (self.min + steps * self.step).min(self.max)
    }
}

fn parse_supported_duration(s: &str) -> Result<u32, String> {
    let months: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number of months"))?;
    if SUPPORTED_DURATIONS.contains(&months) {
        Ok(months)
    } else {
        Err(format!("term must be one of {SUPPORTED_DURATIONS:?} months, got {months}"))
    }
}

fn snap_field(name: &str, slider: &SliderRange, value: Decimal) -> Decimal {
    let snapped = slider.snap(value);
    if snapped != value {
        info!(field = name, from = %value, to = %snapped, "input adjusted to slider range");
    }
    snapped
}

fn clamp_request(request: &LeaseRequest) -> LeaseRequest {
    LeaseRequest {
        price: snap_field("price", &PRICE_SLIDER, request.price),
        initial_percent: snap_field("initial_percent", &INITIAL_SLIDER, request.initial_percent),
        duration_months: request.duration_months,
        buyout_percent: snap_field("buyout_percent", &BUYOUT_SLIDER, request.buyout_percent),
    }
}

fn read_request(args: &QuoteArgs) -> Result<LeaseRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LeaseRequest {
        price: args.price,
        initial_percent: args.initial,
        duration_months: args.months,
        buyout_percent: args.buyout,
    })
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = read_request(&args)?;
    quote_request(request, &args)
}

fn quote_request(
    request: LeaseRequest,
    args: &QuoteArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = if args.no_clamp {
        request
    } else {
        clamp_request(&request)
    };

    let config = match args.rate {
        Some(rate) => PricerConfig::with_annual_rate(rate)?,
        None => PricerConfig::from_env(),
    };
    debug!(annual_rate_percent = %config.annual_rate_percent, "pricing lease");

    let output = lease::quote_lease(&LeaseQuoteInput::new(request, &config))?;
    let display = DisplayQuote::from(&output.result);

    let mut value = serde_json::to_value(&output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("display".into(), serde_json::to_value(display)?);
    }
    Ok(value)
}

pub fn run_validate_buyout(args: ValidateBuyoutArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let check = lease::check_buyout(args.months, args.buyout);

    let mut warnings = Vec::new();
    if !check.rule_found {
        warnings.push(format!(
            "No buyout rule for a {}-month term; default range applied",
            args.months
        ));
    }

    let assumptions = serde_json::json!({
        "duration_months": args.months,
        "buyout_percent": args.buyout,
    });
    let output = with_metadata(
        "Buyout range lookup by contract term",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        check,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_rules() -> Result<Value, Box<dyn std::error::Error>> {
    let row = |label: String, range: &BuyoutRange| BuyoutRuleRow {
        duration_months: label,
        min_percent: range.min_percent,
        max_percent: range.max_percent,
    };
    let mut rows: Vec<BuyoutRuleRow> = BUYOUT_RULES
        .iter()
        .map(|(months, range)| row(months.to_string(), range))
        .collect();
    rows.push(row("default".to_string(), &DEFAULT_BUYOUT_RANGE));
    Ok(serde_json::to_value(rows)?)
}
