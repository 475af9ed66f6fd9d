use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the progressive PIT rate table.
///
/// A band covers chargeable income in `[lower_bound, upper_bound)`. The final
/// band of a table has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitBand {
    pub lower_bound: Decimal,
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl PitBand {
    /// Returns the part of `chargeable_income` that falls inside this band.
    pub fn taxable_portion(
        &self,
        chargeable_income: Decimal,
    ) -> Decimal {
        let top = match self.upper_bound {
            Some(upper) => chargeable_income.min(upper),
            None => chargeable_income,
        };
        (top - self.lower_bound).max(Decimal::ZERO)
    }

    /// Whether `income` lies in this band's half-open range.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.lower_bound && self.upper_bound.is_none_or(|upper| income < upper)
    }

    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn band(
        lower: Decimal,
        upper: Option<Decimal>,
        rate: Decimal,
    ) -> PitBand {
        PitBand {
            lower_bound: lower,
            upper_bound: upper,
            rate,
        }
    }

    #[test]
    fn taxable_portion_is_zero_below_band() {
        let b = band(dec!(800000), Some(dec!(2200000)), dec!(0.15));

        assert_eq!(b.taxable_portion(dec!(500000)), Decimal::ZERO);
    }

    #[test]
    fn taxable_portion_is_partial_inside_band() {
        let b = band(dec!(800000), Some(dec!(2200000)), dec!(0.15));

        assert_eq!(b.taxable_portion(dec!(1000000)), dec!(200000));
    }

    #[test]
    fn taxable_portion_is_capped_at_band_width() {
        let b = band(dec!(800000), Some(dec!(2200000)), dec!(0.15));

        assert_eq!(b.taxable_portion(dec!(9000000)), dec!(1400000));
    }

    #[test]
    fn taxable_portion_of_unbounded_band_grows_with_income() {
        let b = band(dec!(25000000), None, dec!(0.25));

        assert_eq!(b.taxable_portion(dec!(30000000)), dec!(5000000));
    }

    #[test]
    fn contains_is_half_open() {
        let b = band(dec!(800000), Some(dec!(2200000)), dec!(0.15));

        assert!(b.contains(dec!(800000)));
        assert!(b.contains(dec!(2199999.99)));
        assert!(!b.contains(dec!(2200000)));
        assert!(!b.contains(dec!(799999.99)));
    }

    #[test]
    fn unbounded_band_contains_everything_above_lower() {
        let b = band(dec!(25000000), None, dec!(0.25));

        assert!(b.is_unbounded());
        assert!(b.contains(dec!(1000000000)));
    }
}
