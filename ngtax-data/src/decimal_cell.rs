//! Serde helpers that read CSV cells as text before parsing a `Decimal`.
//!
//! The csv deserializer infers numeric cells as `f64`, which rounds amounts
//! past about 17 significant digits. Reading the raw text keeps every digit.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

fn parse(cell: &str) -> Result<Decimal, rust_decimal::Error> {
    let cell = cell.trim();
    Decimal::from_str(cell).or_else(|_| Decimal::from_scientific(cell))
}

/// A required decimal cell.
pub(crate) fn required<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = String::deserialize(deserializer)?;
    parse(&cell).map_err(|err| de::Error::custom(format!("invalid amount '{cell}': {err}")))
}

/// An optional decimal cell; blank means `None`.
///
/// Pair with `#[serde(default)]` so a missing column also reads as `None`.
pub(crate) fn optional<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(cell) if cell.trim().is_empty() => Ok(None),
        Some(cell) => parse(&cell)
            .map(Some)
            .map_err(|err| de::Error::custom(format!("invalid amount '{cell}': {err}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_keeps_every_digit() {
        assert_eq!(
            parse("1234567890123456789.01").unwrap(),
            dec!(1234567890123456789.01)
        );
    }

    #[test]
    fn parse_accepts_scientific_notation() {
        assert_eq!(parse("5e6").unwrap(), dec!(5000000));
        assert_eq!(parse(" -2.5e3 ").unwrap(), dec!(-2500));
    }

    #[test]
    fn parse_rejects_text() {
        assert!(parse("lots").is_err());
    }
}
