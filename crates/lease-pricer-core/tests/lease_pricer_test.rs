use lease_pricer_core::config::PricerConfig;
use lease_pricer_core::format::DisplayQuote;
use lease_pricer_core::lease::{
    compute, compute_breakdown, quote_lease, validate_buyout, LeaseQuoteInput, LeaseRequest,
    BUYOUT_INTEREST_THRESHOLD, SUPPORTED_DURATIONS,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn buyout_rule_table_examples() {
    assert!(validate_buyout(24, dec!(18)));
    assert!(!validate_buyout(24, dec!(17)));
    assert!(!validate_buyout(24, dec!(61)));
    assert!(validate_buyout(35, dec!(1)));
    assert!(!validate_buyout(35, dec!(51)));
    assert!(validate_buyout(99, dec!(30)));
    assert!(!validate_buyout(99, dec!(0)));
}

#[test]
fn quote_from_json_round_trips_through_envelope() {
    let json = r#"{
        "price": 220000,
        "initial_percent": 20,
        "duration_months": 35,
        "buyout_percent": 10,
        "annual_rate_percent": "8.5"
    }"#;
    let input: LeaseQuoteInput = serde_json::from_str(json).unwrap();
    assert_eq!(
        input.request,
        LeaseRequest {
            price: dec!(220000),
            initial_percent: dec!(20),
            duration_months: 35,
            buyout_percent: dec!(10),
        }
    );

    let output = quote_lease(&input).unwrap();
    let display = DisplayQuote::from(&output.result);
    assert_eq!(display.monthly_installment, "5\u{a0}130,26\u{a0}zł");
    assert_eq!(display.total_cost, "245\u{a0}559,26\u{a0}zł");
    assert_eq!(display.cost_ratio, "111.62%");
    assert_eq!(display.warning, None);

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["buyout_within_range"], true);
    assert!(value["metadata"]["version"].is_string());
}

#[test]
fn default_config_prices_with_default_rate() {
    let request = LeaseRequest {
        price: dec!(220000),
        initial_percent: dec!(20),
        duration_months: 35,
        buyout_percent: dec!(10),
    };
    let input = LeaseQuoteInput::new(request.clone(), &PricerConfig::default());
    let output = quote_lease(&input).unwrap();
    assert_eq!(output.result.result, compute(&request, dec!(8.5)).unwrap());
}

#[test]
fn buyout_interest_starts_above_threshold() {
    let mut request = LeaseRequest {
        price: dec!(220000),
        initial_percent: dec!(20),
        duration_months: 47,
        buyout_percent: BUYOUT_INTEREST_THRESHOLD,
    };
    let (_, at_threshold) = compute_breakdown(&request, dec!(8.5)).unwrap();
    assert_eq!(at_threshold.buyout_interest, Decimal::ZERO);

    request.buyout_percent = BUYOUT_INTEREST_THRESHOLD + dec!(0.5);
    let (_, above) = compute_breakdown(&request, dec!(8.5)).unwrap();
    assert!(above.buyout_interest > Decimal::ZERO);
}

fn request_strategy() -> impl Strategy<Value = LeaseRequest> {
    (
        1u32..=1_000_000,
        0u32..=45,
        prop::sample::select(SUPPORTED_DURATIONS.to_vec()),
        0u32..=550,
    )
        .prop_map(|(price, initial, months, buyout_tenths)| LeaseRequest {
            price: Decimal::from(price),
            initial_percent: Decimal::from(initial),
            duration_months: months,
            buyout_percent: Decimal::new(buyout_tenths as i64, 1),
        })
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (1u32..=300).prop_map(|tenths| Decimal::new(tenths as i64, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn outputs_non_negative_for_supported_terms(
        request in request_strategy(),
        rate in rate_strategy(),
    ) {
        let result = compute(&request, rate).unwrap();
        prop_assert!(result.monthly_installment >= Decimal::ZERO);
        prop_assert!(result.total_cost >= Decimal::ZERO);
        prop_assert!(result.cost_ratio_percent >= Decimal::ZERO);
    }

    #[test]
    fn symbolic_buyout_cost_ratio_lower_bound(
        mut request in request_strategy(),
        buyout_hundredths in 0u32..=100,
        rate in rate_strategy(),
    ) {
        request.buyout_percent = Decimal::new(buyout_hundredths as i64, 2);
        let result = compute(&request, rate).unwrap();
        let bound = dec!(100)
            * (Decimal::ONE
                - request.initial_percent / dec!(100)
                - request.buyout_percent / dec!(100));
        prop_assert!(result.cost_ratio_percent >= bound);
    }

    #[test]
    fn compute_is_referentially_pure(
        request in request_strategy(),
        rate in rate_strategy(),
    ) {
        let first = compute(&request, rate).unwrap();
        let second = compute(&request, rate).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_buyout_never_blocks_pricing(
        request in request_strategy(),
        rate in rate_strategy(),
    ) {
        let input = LeaseQuoteInput { request: request.clone(), annual_rate_percent: rate };
        let output = quote_lease(&input).unwrap();
        prop_assert_eq!(
            output.result.buyout_within_range,
            validate_buyout(request.duration_months, request.buyout_percent)
        );
        prop_assert_eq!(output.result.buyout_warning.is_some(), !output.result.buyout_within_range);
    }
}
