//! Common utility functions for tax calculations.
//!
//! Rounding, clamping, and the label formatting shared by the PIT and CIT
//! calculators and the response contract.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds a decimal value to exactly two decimal places (kobo) using
/// half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns `value`, or zero when it is negative.
///
/// A negative amount is logged at `warn` with the field name.
pub fn clamp_non_negative(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative amount clamped to zero");
        return Decimal::ZERO;
    }
    value
}

/// Formats an amount with two decimals and comma thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(1400000)), "1,400,000.00");
/// assert_eq!(format_amount(dec!(999.5)), "999.50");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}.{fraction}")
}

/// Formats a fractional rate as a percentage label.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ngtax_core::calculations::common::percent_label;
///
/// assert_eq!(percent_label(dec!(0.30)), "30%");
/// assert_eq!(percent_label(dec!(0.075)), "7.5%");
/// assert_eq!(percent_label(dec!(0)), "0%");
/// ```
pub fn percent_label(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.0015)), dec!(0.00));
        assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn round_half_up_preserves_whole_naira() {
        assert_eq!(round_half_up(dec!(796800)), dec!(796800));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999999.995)), dec!(1000000000.00));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50.00), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // clamp_non_negative tests
    // =========================================================================

    #[test]
    fn clamp_non_negative_keeps_positive_values() {
        assert_eq!(clamp_non_negative("gross_income", dec!(10)), dec!(10));
    }

    #[test]
    fn clamp_non_negative_zeroes_negative_values() {
        assert_eq!(clamp_non_negative("gross_income", dec!(-10)), Decimal::ZERO);
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn clamp_non_negative_warns_with_field_name() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            clamp_non_negative("annual_rent_paid", dec!(-1));
            clamp_non_negative("pension_contribution", dec!(5));
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("WARN"), "unexpected output: {output}");
        assert!(output.contains("annual_rent_paid"), "unexpected output: {output}");
    }

    // =========================================================================
    // format_amount tests
    // =========================================================================

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(800000)), "800,000.00");
        assert_eq!(format_amount(dec!(3260000)), "3,260,000.00");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn format_amount_handles_small_values() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(12)), "12.00");
        assert_eq!(format_amount(dec!(123)), "123.00");
    }

    #[test]
    fn format_amount_keeps_sign() {
        assert_eq!(format_amount(dec!(-1500)), "-1,500.00");
    }

    // =========================================================================
    // percent_label tests
    // =========================================================================

    #[test]
    fn percent_label_drops_trailing_zeros() {
        assert_eq!(percent_label(dec!(0.15)), "15%");
        assert_eq!(percent_label(dec!(0.040)), "4%");
        assert_eq!(percent_label(dec!(0.00)), "0%");
    }
}
