//! Display formatting for quote values.
//!
//! Amounts are rendered the way `pl-PL` renders PLN currency: thousands
//! grouped with a non-breaking space, comma decimal separator, `zł` suffix.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const CURRENCY_SUFFIX: &str = "\u{a0}zł";

/// Format an amount as PLN, e.g. `220000` -> `"220 000,00 zł"`.
pub fn format_pln(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(DECIMAL_SEPARATOR);
    out.push_str(frac_part);
    out.push_str(CURRENCY_SUFFIX);
    out
}

/// Format a percentage with two decimals, e.g. `111.6178` -> `"111.62%"`.
pub fn format_percent(value: Percent) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// The three display strings of a quote plus the optional buyout warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayQuote {
    pub monthly_installment: String,
    pub total_cost: String,
    pub cost_ratio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl DisplayQuote {
    pub fn new(
        monthly_installment: Money,
        total_cost: Money,
        cost_ratio_percent: Percent,
        warning: Option<String>,
    ) -> Self {
        Self {
            monthly_installment: format_pln(monthly_installment),
            total_cost: format_pln(total_cost),
            cost_ratio: format_percent(cost_ratio_percent),
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_pln_grouping() {
        assert_eq!(format_pln(dec!(220000)), "220\u{a0}000,00\u{a0}zł");
        assert_eq!(format_pln(dec!(4000)), "4\u{a0}000,00\u{a0}zł");
        assert_eq!(format_pln(dec!(1234567.891)), "1\u{a0}234\u{a0}567,89\u{a0}zł");
    }

    #[test]
    fn test_format_pln_small_values() {
        assert_eq!(format_pln(dec!(999.999)), "1\u{a0}000,00\u{a0}zł");
        assert_eq!(format_pln(dec!(0.005)), "0,01\u{a0}zł");
        assert_eq!(format_pln(Decimal::ZERO), "0,00\u{a0}zł");
    }

    #[test]
    fn test_format_pln_negative() {
        assert_eq!(format_pln(dec!(-1500.5)), "-1\u{a0}500,50\u{a0}zł");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(111.617847)), "111.62%");
        assert_eq!(format_percent(dec!(100)), "100.00%");
        assert_eq!(format_percent(dec!(110.345)), "110.35%");
    }

    #[test]
    fn test_display_quote_strings() {
        let display = DisplayQuote::new(dec!(5130.2647), dec!(245559.264), dec!(111.6178), None);
        assert_eq!(display.monthly_installment, "5\u{a0}130,26\u{a0}zł");
        assert_eq!(display.total_cost, "245\u{a0}559,26\u{a0}zł");
        assert_eq!(display.cost_ratio, "111.62%");
        assert!(display.warning.is_none());
    }
}
