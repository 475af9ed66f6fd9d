//! Personal Income Tax calculation under the Nigeria Tax Act.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Clamp every input amount to be non-negative |
//! | 2    | Rent relief: rent paid × relief percentage, capped |
//! | 3    | Total deductions: pension + NHF + NHIS + life insurance + mortgage interest + rent relief |
//! | 4    | Chargeable income: gross income − total deductions, minimum 0 |
//! | 5    | Apply each band of the rate table to the chargeable income |
//! | 6    | Tax payable: sum of band taxes, rounded once to kobo |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use ngtax_core::calculations::PitCalculator;
//! use ngtax_core::{
//!     CitRates, CitThresholds, DevLevyRule, PitBand, PitInput, RentReliefRule, TaxYearConfig,
//! };
//!
//! let config = TaxYearConfig {
//!     tax_year: 2026,
//!     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     pit_bands: vec![
//!         PitBand { lower_bound: dec!(0), upper_bound: Some(dec!(800000)), rate: dec!(0) },
//!         PitBand { lower_bound: dec!(800000), upper_bound: Some(dec!(2200000)), rate: dec!(0.15) },
//!         PitBand { lower_bound: dec!(2200000), upper_bound: None, rate: dec!(0.18) },
//!     ],
//!     rent_relief: RentReliefRule { percentage: dec!(0.20), cap: dec!(500000) },
//!     cit_thresholds: CitThresholds {
//!         turnover_cap: dec!(50000000),
//!         fixed_asset_cap: dec!(250000000),
//!         excluded_sectors: vec![],
//!     },
//!     cit_rates: CitRates { small: dec!(0), standard: dec!(0.30) },
//!     development_levy: DevLevyRule { rate: dec!(0.04) },
//! };
//!
//! let input = PitInput {
//!     gross_income: dec!(6000000),
//!     pension_contribution: dec!(300000),
//!     annual_rent_paid: dec!(1200000),
//!     ..PitInput::default()
//! };
//!
//! let result = PitCalculator::new(&config).calculate(&input);
//!
//! assert_eq!(result.capped_rent_relief, dec!(240000));
//! assert_eq!(result.chargeable_income, dec!(5460000));
//! assert_eq!(result.tax_payable, dec!(796800));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{
    clamp_non_negative, format_amount, max, percent_label, round_half_up,
};
use crate::{BandTax, PitInput, PitResult, TaxYearConfig};

/// Calculator for personal income tax.
///
/// Borrows the configuration for the duration of a calculation; it holds no
/// other state.
#[derive(Debug, Clone, Copy)]
pub struct PitCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> PitCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Computes reliefs, chargeable income, and the banded tax.
    ///
    /// Total over every input: negative amounts become zero and the result
    /// never fails.
    pub fn calculate(
        &self,
        input: &PitInput,
    ) -> PitResult {
        let input = self.normalize(input);

        let capped_rent_relief = self.rent_relief(input.annual_rent_paid);
        let total_deductions = self.total_deductions(&input, capped_rent_relief);
        let chargeable_income = self.chargeable_income(input.gross_income, total_deductions);

        let (tax_breakdown, tax_payable) = self.apply_bands(chargeable_income);

        PitResult {
            gross_income: input.gross_income,
            capped_rent_relief,
            total_deductions,
            chargeable_income,
            tax_breakdown,
            tax_payable,
        }
    }

    fn normalize(
        &self,
        input: &PitInput,
    ) -> PitInput {
        PitInput {
            gross_income: clamp_non_negative("gross_income", input.gross_income),
            pension_contribution: clamp_non_negative(
                "pension_contribution",
                input.pension_contribution,
            ),
            nhf_contribution: clamp_non_negative("nhf_contribution", input.nhf_contribution),
            nhis_contribution: clamp_non_negative("nhis_contribution", input.nhis_contribution),
            life_insurance_premium: clamp_non_negative(
                "life_insurance_premium",
                input.life_insurance_premium,
            ),
            mortgage_interest: clamp_non_negative("mortgage_interest", input.mortgage_interest),
            annual_rent_paid: clamp_non_negative("annual_rent_paid", input.annual_rent_paid),
        }
    }

    /// Rent relief: the configured share of rent paid, never above the cap.
    fn rent_relief(
        &self,
        annual_rent_paid: Decimal,
    ) -> Decimal {
        let rule = &self.config.rent_relief;
        (annual_rent_paid * rule.percentage).min(rule.cap)
    }

    /// Sum of every relief, saturating at `Decimal::MAX`.
    fn total_deductions(
        &self,
        input: &PitInput,
        capped_rent_relief: Decimal,
    ) -> Decimal {
        [
            input.pension_contribution,
            input.nhf_contribution,
            input.nhis_contribution,
            input.life_insurance_premium,
            input.mortgage_interest,
            capped_rent_relief,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn chargeable_income(
        &self,
        gross_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        max(gross_income - total_deductions, Decimal::ZERO)
    }

    /// Walks the band table in order and returns the breakdown and the
    /// rounded total.
    ///
    /// Band taxes are summed exactly and rounded once. Each breakdown entry
    /// is rounded for display and the rounding residual is settled against
    /// the entries (see [`settle_residual`]), so the entries always add up to
    /// the total.
    fn apply_bands(
        &self,
        chargeable_income: Decimal,
    ) -> (Vec<BandTax>, Decimal) {
        let mut breakdown = Vec::new();
        let mut exact_total = Decimal::ZERO;

        for (index, band) in self.config.pit_bands.iter().enumerate() {
            let taxable = band.taxable_portion(chargeable_income);
            if taxable <= Decimal::ZERO {
                continue;
            }

            let tax = taxable * band.rate;
            exact_total += tax;
            breakdown.push(BandTax {
                band_label: band_label(index, taxable, band.rate),
                rate: band.rate,
                taxable_amount: taxable,
                tax_amount: round_half_up(tax),
            });
        }

        let tax_payable = round_half_up(exact_total);
        let rounded_sum: Decimal = breakdown.iter().map(|b| b.tax_amount).sum();
        settle_residual(&mut breakdown, tax_payable - rounded_sum);

        debug!(
            chargeable_income = %chargeable_income,
            bands = breakdown.len(),
            marginal_rate = ?self.config.band_for(chargeable_income).map(|b| b.rate),
            tax_payable = %tax_payable,
            "applied PIT bands"
        );

        (breakdown, tax_payable)
    }
}

/// Folds the difference between the rounded total and the sum of rounded
/// entries back into the breakdown.
///
/// A positive residual goes to the last entry. A negative one is taken from
/// the entries last to first, never pushing an entry below zero. The
/// rounded total is never negative, so the residual is always fully
/// absorbed.
fn settle_residual(
    breakdown: &mut [BandTax],
    residual: Decimal,
) {
    if residual >= Decimal::ZERO {
        if let Some(last) = breakdown.last_mut() {
            last.tax_amount += residual;
        }
        return;
    }

    let mut remaining = -residual;
    for entry in breakdown.iter_mut().rev() {
        if remaining.is_zero() {
            break;
        }
        let taken = remaining.min(entry.tax_amount);
        entry.tax_amount -= taken;
        remaining -= taken;
    }
}

/// `First 800,000.00 @ 0%` for the opening band, `Next ... @ r%` after it.
fn band_label(
    index: usize,
    taxable: Decimal,
    rate: Decimal,
) -> String {
    let position = if index == 0 { "First" } else { "Next" };
    format!(
        "{position} {} @ {}",
        format_amount(taxable),
        percent_label(rate)
    )
}
