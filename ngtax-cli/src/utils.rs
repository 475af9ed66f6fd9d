use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes commas (thousands separator) and a leading naira sign.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('₦')
        .unwrap_or(trimmed)
        .replace(',', "")
}

/// Parses a command-line amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"5,000,000"`) and an
/// optional leading `₦`. Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}
