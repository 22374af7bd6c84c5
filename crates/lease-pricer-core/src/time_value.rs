use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::{overflow, LeasePricerError};
use crate::types::{Money, Percent, Rate};
use crate::LeasePricerResult;

const NEWTON_ITERATIONS: u32 = 60;
const ROOT_TOLERANCE: Decimal = dec!(0.0000000000000000001);
const MONTHS_PER_YEAR: u32 = 12;

/// Effective monthly compounding rate for an annual nominal rate given in percent.
///
/// monthly_rate = (1 + annual_percent / 100)^(1/12) - 1
pub fn effective_monthly_rate(annual_rate_percent: Percent) -> LeasePricerResult<Rate> {
    let growth = (annual_rate_percent / dec!(100))
        .checked_add(Decimal::ONE)
        .ok_or_else(|| overflow("annual growth factor"))?;
    if growth <= Decimal::ZERO {
        return Err(LeasePricerError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Annual rate must be greater than -100%".into(),
        });
    }
    Ok(nth_root(growth, MONTHS_PER_YEAR)? - Decimal::ONE)
}

/// (1 + rate)^periods by repeated multiplication.
pub fn compound_factor(rate: Rate, periods: u32) -> LeasePricerResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor
            .checked_mul(one_plus_r)
            .ok_or_else(|| overflow(&format!("compound factor over {periods} periods")))?;
    }
    Ok(factor)
}

/// Level periodic payment that amortizes `principal` over `periods` at `rate`.
///
/// PMT = P * r * (1+r)^n / ((1+r)^n - 1)
///
/// A zero rate or zero periods leaves the annuity factor at zero, which is
/// reported as a division by zero rather than falling back to straight-line.
pub fn annuity_payment(rate: Rate, periods: u32, principal: Money) -> LeasePricerResult<Money> {
    if periods == 0 {
        return Err(LeasePricerError::DivisionByZero {
            context: "annuity payment over zero periods".into(),
        });
    }

    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LeasePricerError::DivisionByZero {
            context: "annuity factor at zero periodic rate".into(),
        });
    }

    (principal * rate)
        .checked_mul(factor)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| overflow("annuity payment"))
}

/// Newton's method for the nth root of A.
/// x_{k+1} = ((n-1)*x_k + A / x_k^(n-1)) / n
fn nth_root(a: Decimal, n: u32) -> LeasePricerResult<Decimal> {
    if a <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    if a == Decimal::ONE || n <= 1 {
        return Ok(a);
    }
    let n_dec = Decimal::from(n);
    let n_minus_1 = n_dec - Decimal::ONE;

    // Near 1 the first-order expansion is already a close guess; elsewhere
    // start from the approximate power so x^(n-1) stays in range.
    let mut x = if a > dec!(0.5) && a < dec!(2.0) {
        Decimal::ONE + (a - Decimal::ONE) / n_dec
    } else {
        a.checked_powd(Decimal::ONE / n_dec)
            .filter(|guess| *guess > Decimal::ZERO)
            .unwrap_or(a)
    };

    for _ in 0..NEWTON_ITERATIONS {
        let mut x_pow = Decimal::ONE;
        for _ in 0..(n - 1) {
            x_pow = x_pow
                .checked_mul(x)
                .ok_or_else(|| overflow("nth root iteration"))?;
        }
        if x_pow.is_zero() {
            break;
        }
        let x_new = (n_minus_1 * x + a / x_pow) / n_dec;
        if (x_new - x).abs() < ROOT_TOLERANCE {
            return Ok(x_new);
        }
        x = x_new;
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_matches_float_root() {
        let monthly = effective_monthly_rate(dec!(8.5)).unwrap();
        let expected = 1.085_f64.powf(1.0 / 12.0) - 1.0;
        let got = monthly.to_f64().unwrap();
        assert!(((got - expected) / expected).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_rate_compounds_back_to_annual() {
        let monthly = effective_monthly_rate(dec!(12)).unwrap();
        let annual = compound_factor(monthly, 12).unwrap() - Decimal::ONE;
        assert!((annual - dec!(0.12)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_zero_annual_rate_gives_zero_monthly() {
        assert_eq!(effective_monthly_rate(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rate_at_minus_hundred_rejected() {
        assert!(effective_monthly_rate(dec!(-100)).is_err());
    }

    #[test]
    fn test_compound_factor_integer_power() {
        assert_eq!(compound_factor(dec!(0.1), 3).unwrap(), dec!(1.331));
        assert_eq!(compound_factor(dec!(0.1), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_annuity_payment_basic() {
        // 100,000 over 12 months at 1% per month ≈ 8,884.88
        let pmt = annuity_payment(dec!(0.01), 12, dec!(100000)).unwrap();
        assert!((pmt - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_periods() {
        let err = annuity_payment(dec!(0.01), 0, dec!(1000)).unwrap_err();
        assert!(matches!(err, LeasePricerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let err = annuity_payment(Decimal::ZERO, 24, dec!(1000)).unwrap_err();
        assert!(matches!(err, LeasePricerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_very_high_annual_rate_converges() {
        // 100000% a year: growth factor 1001, monthly factor ~1.7780
        let monthly = effective_monthly_rate(dec!(100000)).unwrap();
        let expected = 1001_f64.powf(1.0 / 12.0) - 1.0;
        let got = monthly.to_f64().unwrap();
        assert!(((got - expected) / expected).abs() < 1e-9);
    }

    #[test]
    fn test_compound_factor_overflow_is_error() {
        let err = compound_factor(dec!(0.0068), 12000).unwrap_err();
        assert!(matches!(err, LeasePricerError::Overflow { .. }));
    }

    #[test]
    fn test_annuity_payment_overflow_is_error() {
        let err = annuity_payment(dec!(0.5), 150, dec!(1000000)).unwrap_err();
        assert!(matches!(err, LeasePricerError::Overflow { .. }));
    }
}
