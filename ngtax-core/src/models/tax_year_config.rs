use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{PitBand, Sector};

/// Reasons a [`TaxYearConfig`] cannot be used to compute tax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidConfiguration {
    #[error("no PIT bands configured")]
    NoBands,

    #[error("first PIT band must start at 0, got {0}")]
    FirstBandNotAtZero(Decimal),

    #[error("gap between PIT bands {index} and {next}: {upper} .. {lower}", next = .index + 1)]
    BandGap {
        index: usize,
        upper: Decimal,
        lower: Decimal,
    },

    #[error("PIT bands {index} and {next} overlap: {lower} < {upper}", next = .index + 1)]
    BandOverlap {
        index: usize,
        upper: Decimal,
        lower: Decimal,
    },

    #[error("PIT band {index} has upper bound {upper} not above lower bound {lower}")]
    EmptyBand {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("PIT band {0} is unbounded but is not the last band")]
    UnboundedBandNotLast(usize),

    #[error("last PIT band must be unbounded")]
    LastBandBounded,

    #[error("PIT band {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("PIT band {index} rate {rate} is lower than the previous band's {previous}")]
    DecreasingRate {
        index: usize,
        previous: Decimal,
        rate: Decimal,
    },

    #[error("{name} must be non-negative, got {value}")]
    NegativeValue { name: &'static str, value: Decimal },

    #[error("{name} must be between 0 and 1, got {value}")]
    FractionOutOfRange { name: &'static str, value: Decimal },

    #[error("small company CIT rate must be zero, got {0}")]
    NonZeroSmallCompanyRate(Decimal),

    #[error("more than one configuration is effective from {0}")]
    DuplicateEffectiveDate(NaiveDate),
}

/// Personal income tax rent relief: a share of annual rent paid, capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentReliefRule {
    pub percentage: Decimal,
    pub cap: Decimal,
}

/// Limits a company must stay within to be classified as small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitThresholds {
    pub turnover_cap: Decimal,
    pub fixed_asset_cap: Decimal,
    #[serde(default)]
    pub excluded_sectors: Vec<Sector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitRates {
    pub small: Decimal,
    pub standard: Decimal,
}

/// Development levy charged on the assessable profit of medium and large
/// companies. Small companies are exempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevLevyRule {
    pub rate: Decimal,
}

/// Every rate, cap, and threshold for one tax year.
///
/// A configuration is published through [`crate::TaxEngine::new`] or
/// [`crate::ConfigSchedule::new`], both of which call [`Self::validate`] and
/// refuse to serve requests from an invalid table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub effective_from: NaiveDate,
    pub pit_bands: Vec<PitBand>,
    pub rent_relief: RentReliefRule,
    pub cit_thresholds: CitThresholds,
    pub cit_rates: CitRates,
    pub development_levy: DevLevyRule,
}

impl TaxYearConfig {
    /// Checks the band table and every rate and cap.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidConfiguration`] found, band table first.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        self.validate_bands()?;

        non_negative("rent relief cap", self.rent_relief.cap)?;
        fraction("rent relief percentage", self.rent_relief.percentage)?;
        non_negative("CIT turnover cap", self.cit_thresholds.turnover_cap)?;
        non_negative("CIT fixed asset cap", self.cit_thresholds.fixed_asset_cap)?;
        fraction("standard CIT rate", self.cit_rates.standard)?;
        fraction("development levy rate", self.development_levy.rate)?;

        if !self.cit_rates.small.is_zero() {
            return Err(InvalidConfiguration::NonZeroSmallCompanyRate(
                self.cit_rates.small,
            ));
        }

        Ok(())
    }

    fn validate_bands(&self) -> Result<(), InvalidConfiguration> {
        let first = self
            .pit_bands
            .first()
            .ok_or(InvalidConfiguration::NoBands)?;
        if !first.lower_bound.is_zero() {
            return Err(InvalidConfiguration::FirstBandNotAtZero(
                first.lower_bound,
            ));
        }

        let last_index = self.pit_bands.len() - 1;
        for (index, band) in self.pit_bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(InvalidConfiguration::RateOutOfRange {
                    index,
                    rate: band.rate,
                });
            }

            match band.upper_bound {
                Some(upper) if upper <= band.lower_bound => {
                    return Err(InvalidConfiguration::EmptyBand {
                        index,
                        lower: band.lower_bound,
                        upper,
                    });
                }
                None if index != last_index => {
                    return Err(InvalidConfiguration::UnboundedBandNotLast(index));
                }
                _ => {}
            }

            let Some(next) = self.pit_bands.get(index + 1) else {
                continue;
            };
            // `upper_bound` is Some here: an unbounded non-last band was rejected above.
            let upper = band.upper_bound.unwrap_or(Decimal::MAX);
            if next.lower_bound > upper {
                return Err(InvalidConfiguration::BandGap {
                    index,
                    upper,
                    lower: next.lower_bound,
                });
            }
            if next.lower_bound < upper {
                return Err(InvalidConfiguration::BandOverlap {
                    index,
                    upper,
                    lower: next.lower_bound,
                });
            }
            if next.rate < band.rate {
                return Err(InvalidConfiguration::DecreasingRate {
                    index: index + 1,
                    previous: band.rate,
                    rate: next.rate,
                });
            }
        }

        if !self.pit_bands[last_index].is_unbounded() {
            return Err(InvalidConfiguration::LastBandBounded);
        }

        Ok(())
    }

    /// The single band whose range contains `chargeable_income`.
    pub fn band_for(
        &self,
        chargeable_income: Decimal,
    ) -> Option<&PitBand> {
        self.pit_bands
            .iter()
            .find(|band| band.contains(chargeable_income))
    }

    /// Whether companies in `sector` can never be classified as small.
    pub fn is_excluded_sector(
        &self,
        sector: Sector,
    ) -> bool {
        self.cit_thresholds.excluded_sectors.contains(&sector)
    }
}

fn non_negative(
    name: &'static str,
    value: Decimal,
) -> Result<(), InvalidConfiguration> {
    if value < Decimal::ZERO {
        return Err(InvalidConfiguration::NegativeValue { name, value });
    }
    Ok(())
}

fn fraction(
    name: &'static str,
    value: Decimal,
) -> Result<(), InvalidConfiguration> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(InvalidConfiguration::FractionOutOfRange { name, value });
    }
    Ok(())
}
