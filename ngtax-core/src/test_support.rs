//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    CitRates, CitThresholds, DevLevyRule, PitBand, RentReliefRule, Sector, TaxYearConfig,
};

pub(crate) fn band(
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

/// Nigeria Tax Act 2025 values, effective 1 January 2026.
pub(crate) fn test_config() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2026,
        effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        pit_bands: vec![
            band(dec!(0), Some(dec!(800000)), dec!(0.00)),
            band(dec!(800000), Some(dec!(2200000)), dec!(0.15)),
            band(dec!(2200000), Some(dec!(9000000)), dec!(0.18)),
            band(dec!(9000000), Some(dec!(13000000)), dec!(0.21)),
            band(dec!(13000000), Some(dec!(25000000)), dec!(0.23)),
            band(dec!(25000000), None, dec!(0.25)),
        ],
        rent_relief: RentReliefRule {
            percentage: dec!(0.20),
            cap: dec!(500000),
        },
        cit_thresholds: CitThresholds {
            turnover_cap: dec!(50000000),
            fixed_asset_cap: dec!(250000000),
            excluded_sectors: vec![Sector::ProfessionalServices],
        },
        cit_rates: CitRates {
            small: dec!(0),
            standard: dec!(0.30),
        },
        development_levy: DevLevyRule { rate: dec!(0.04) },
    }
}
