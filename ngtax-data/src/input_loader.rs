//! CSV loader for batch calculation inputs.
//!
//! Column order does not matter (headers are matched by name). Every amount
//! column is optional: leave the cell empty, or drop the column, for zero.
//! Amounts are parsed from the cell text, so every digit is kept.
//!
//! ## PIT rows
//!
//! | Column | Notes |
//! |--------------------------|-------------------------------------------------|
//! | `gross_income` | Takes precedence over the four income sources |
//! | `employment_income` | |
//! | `business_profit` | |
//! | `investment_income` | |
//! | `other_income` | |
//! | `pension_contribution` | |
//! | `nhf_contribution` | |
//! | `nhis_contribution` | |
//! | `life_insurance_premium` | |
//! | `mortgage_interest` | |
//! | `annual_rent_paid` | |
//!
//! ```csv
//! employment_income,business_profit,pension_contribution,annual_rent_paid
//! 5000000,1000000,300000,1200000
//! ```
//!
//! ## CIT rows
//!
//! | Column | Notes |
//! |----------------------|-----------------------------------------------|
//! | `gross_turnover` | |
//! | `total_fixed_assets` | |
//! | `assessable_profit` | |
//! | `sector` | `general` (default) or `professional_services` |
//!
//! ```csv
//! gross_turnover,total_fixed_assets,assessable_profit,sector
//! 80000000,,20000000,general
//! 30000000,5000000,9000000,professional_services
//! ```

use std::path::{Path, PathBuf};

use ngtax_core::Sector;
use ngtax_core::contract::v1::{CitRequest, PitRequest};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::decimal_cell;

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PitRow {
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    gross_income: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    employment_income: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    business_profit: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    investment_income: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    other_income: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    pension_contribution: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    nhf_contribution: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    nhis_contribution: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    life_insurance_premium: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    mortgage_interest: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    annual_rent_paid: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CitRow {
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    gross_turnover: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    total_fixed_assets: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal_cell::optional")]
    assessable_profit: Option<Decimal>,
    sector: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading batch input files.
#[derive(Debug, thiserror::Error)]
pub enum InputLoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid or a cell has the wrong type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `sector` cell held an unknown code. `row` is 1-based, header
    /// excluded.
    #[error("unrecognised sector '{value}' on row {row}")]
    InvalidSector { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

fn convert_pit_row(row: PitRow) -> PitRequest {
    let amount = |cell: Option<Decimal>| cell.unwrap_or_default();

    PitRequest {
        gross_income: row.gross_income,
        employment_income: amount(row.employment_income),
        business_profit: amount(row.business_profit),
        investment_income: amount(row.investment_income),
        other_income: amount(row.other_income),
        pension_contribution: amount(row.pension_contribution),
        nhf_contribution: amount(row.nhf_contribution),
        nhis_contribution: amount(row.nhis_contribution),
        life_insurance_premium: amount(row.life_insurance_premium),
        mortgage_interest: amount(row.mortgage_interest),
        annual_rent_paid: amount(row.annual_rent_paid),
    }
}

fn convert_cit_row(
    row: CitRow,
    row_number: usize,
) -> Result<CitRequest, InputLoadError> {
    let sector = match row.sector.as_deref() {
        None | Some("") => Sector::General,
        Some(code) => Sector::parse(code).ok_or_else(|| InputLoadError::InvalidSector {
            value: code.to_string(),
            row: row_number,
        })?,
    };

    Ok(CitRequest {
        gross_turnover: row.gross_turnover.unwrap_or_default(),
        total_fixed_assets: row.total_fixed_assets.unwrap_or_default(),
        assessable_profit: row.assessable_profit.unwrap_or_default(),
        is_professional_services: sector == Sector::ProfessionalServices,
    })
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn load_rows<T, U>(
    input: &str,
    mut convert: impl FnMut(T, usize) -> Result<U, InputLoadError>,
) -> Result<Vec<U>, InputLoadError>
where
    T: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(idx, result)| convert(result?, idx + 1))
        .collect()
}

fn read_file(path: &Path) -> Result<String, InputLoadError> {
    std::fs::read_to_string(path).map_err(|source| InputLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse PIT input rows, in file order.
pub fn load_pit_requests_from_str(input: &str) -> Result<Vec<PitRequest>, InputLoadError> {
    load_rows(input, |row: PitRow, _| Ok(convert_pit_row(row)))
}

/// Parse CIT input rows, in file order.
///
/// # Errors
///
/// * [`InputLoadError::Parse`] if the CSV is invalid.
/// * [`InputLoadError::InvalidSector`] if a row names an unknown sector.
pub fn load_cit_requests_from_str(input: &str) -> Result<Vec<CitRequest>, InputLoadError> {
    load_rows(input, convert_cit_row)
}

pub fn load_pit_requests_from_file(path: &Path) -> Result<Vec<PitRequest>, InputLoadError> {
    load_pit_requests_from_str(&read_file(path)?)
}

pub fn load_cit_requests_from_file(path: &Path) -> Result<Vec<CitRequest>, InputLoadError> {
    load_cit_requests_from_str(&read_file(path)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const PIT_CSV: &str = "\
employment_income,business_profit,pension_contribution,annual_rent_paid
5000000,1000000,300000,1200000
750000,,,
";

    const CIT_CSV: &str = "\
gross_turnover,total_fixed_assets,assessable_profit,sector
80000000,,20000000,general
30000000,5000000,9000000,professional_services
45000000,100000000,7000000,
";

    #[test]
    fn test_pit_rows_sum_income_sources() {
        let requests = load_pit_requests_from_str(PIT_CSV).expect("should parse");

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].gross_income, None);
        assert_eq!(requests[0].gross_income(), dec!(6000000));
        assert_eq!(requests[0].pension_contribution, dec!(300000));
        assert_eq!(requests[0].annual_rent_paid, dec!(1200000));
    }

    #[test]
    fn test_pit_empty_cells_are_zero() {
        let requests = load_pit_requests_from_str(PIT_CSV).unwrap();

        assert_eq!(
            requests[1],
            PitRequest {
                employment_income: dec!(750000),
                ..PitRequest::default()
            }
        );
    }

    #[test]
    fn test_pit_explicit_gross_income() {
        let csv = "gross_income,employment_income\n4000000,1000000\n";

        let requests = load_pit_requests_from_str(csv).unwrap();

        assert_eq!(requests[0].gross_income(), dec!(4000000));
    }

    #[test]
    fn test_cit_rows_map_sector() {
        let requests = load_cit_requests_from_str(CIT_CSV).expect("should parse");

        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0],
            CitRequest {
                gross_turnover: dec!(80000000),
                total_fixed_assets: dec!(0),
                assessable_profit: dec!(20000000),
                is_professional_services: false,
            }
        );
        assert!(requests[1].is_professional_services);
        assert!(!requests[2].is_professional_services);
    }

    #[test]
    fn test_cit_unknown_sector_reports_row() {
        let csv = "\
gross_turnover,assessable_profit,sector
1000,100,general
2000,200,banking
";

        let err = load_cit_requests_from_str(csv).expect_err("should fail");

        match err {
            InputLoadError::InvalidSector { ref value, row } => {
                assert_eq!(value, "banking");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidSector, got {other:?}"),
        }
    }

    #[test]
    fn test_long_amounts_keep_full_precision() {
        let csv = "\
gross_income,annual_rent_paid
1234567890123456789.01,0.000000000000000001
";

        let requests = load_pit_requests_from_str(csv).unwrap();

        assert_eq!(requests[0].gross_income, Some(dec!(1234567890123456789.01)));
        assert_eq!(requests[0].annual_rent_paid, dec!(0.000000000000000001));
    }

    #[test]
    fn test_cit_amounts_keep_full_precision() {
        let csv = "assessable_profit\n9876543210987654321.99\n";

        let requests = load_cit_requests_from_str(csv).unwrap();

        assert_eq!(requests[0].assessable_profit, dec!(9876543210987654321.99));
    }

    #[test]
    fn test_bad_decimal_is_parse_error() {
        let csv = "gross_turnover\nlots\n";

        let result = load_cit_requests_from_str(csv);

        assert!(matches!(result, Err(InputLoadError::Parse(_))));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "employment_income,annual_rent_paid\n100,200,300\n";

        let result = load_pit_requests_from_str(csv);

        assert!(matches!(result, Err(InputLoadError::Parse(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let requests = load_cit_requests_from_str("gross_turnover,sector\n").unwrap();

        assert!(requests.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_pit_requests_from_file(Path::new("no/such/file.csv"));

        assert!(matches!(result, Err(InputLoadError::Io { .. })));
    }
}
