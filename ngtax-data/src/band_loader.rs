use std::io::Read;

use ngtax_core::{InvalidConfiguration, PitBand, TaxYearConfig};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::decimal_cell;

/// Errors that can occur when loading PIT band tables.
#[derive(Debug, Error)]
pub enum PitBandLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("No PIT bands for tax year {0}")]
    NoBandsForYear(i32),

    #[error("Invalid band table: {0}")]
    Invalid(#[from] InvalidConfiguration),
}

impl From<csv::Error> for PitBandLoaderError {
    fn from(err: csv::Error) -> Self {
        PitBandLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a PIT bands CSV file.
///
/// - `tax_year`: The tax year the band belongs to (e.g., 2026)
/// - `lower_bound`: Chargeable income at which the band starts
/// - `upper_bound`: Chargeable income at which the band ends (empty for unbounded)
/// - `rate`: The marginal rate as a fraction (e.g., 0.15 for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PitBandRecord {
    pub tax_year: i32,
    #[serde(deserialize_with = "decimal_cell::required")]
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "decimal_cell::optional")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "decimal_cell::required")]
    pub rate: Decimal,
}

impl From<&PitBandRecord> for PitBand {
    fn from(record: &PitBandRecord) -> Self {
        PitBand {
            lower_bound: record.lower_bound,
            upper_bound: record.upper_bound,
            rate: record.rate,
        }
    }
}

/// Loader for PIT band tables from CSV files.
///
/// A file may hold bands for several tax years; [`PitBandLoader::apply_to`]
/// picks the rows matching the configuration's year.
pub struct PitBandLoader;

impl PitBandLoader {
    /// Parse band records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PitBandRecord>, PitBandLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PitBandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// The band table for `tax_year`, ordered by lower bound.
    pub fn bands_for_year(
        records: &[PitBandRecord],
        tax_year: i32,
    ) -> Result<Vec<PitBand>, PitBandLoaderError> {
        let mut bands: Vec<PitBand> = records
            .iter()
            .filter(|r| r.tax_year == tax_year)
            .map(PitBand::from)
            .collect();

        if bands.is_empty() {
            return Err(PitBandLoaderError::NoBandsForYear(tax_year));
        }

        bands.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        Ok(bands)
    }

    /// Replaces the band table of `config` with the rows for its tax year.
    ///
    /// The resulting configuration is re-validated before it is returned.
    pub fn apply_to(
        mut config: TaxYearConfig,
        records: &[PitBandRecord],
    ) -> Result<TaxYearConfig, PitBandLoaderError> {
        config.pit_bands = Self::bands_for_year(records, config.tax_year)?;
        config.validate()?;

        info!(
            tax_year = config.tax_year,
            bands = config.pit_bands.len(),
            "replaced PIT band table"
        );
        Ok(config)
    }
}
