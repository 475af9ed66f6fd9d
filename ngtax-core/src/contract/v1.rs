//! Version 1 of the calculator contract.
//!
//! Requests accept JSON numbers for every amount, with absent fields taken as
//! zero. Responses carry amounts as plain JSON numbers and rates as
//! percentage labels such as `"30%"`; formatting money for display is left
//! to the caller.
//!
//! # Example
//!
//! ```
//! use ngtax_core::contract::v1::{CitRequest, PitRequest};
//!
//! let pit: PitRequest = serde_json::from_str(
//!     r#"{"employment_income": 5000000, "business_profit": 1000000, "annual_rent_paid": 1200000}"#,
//! ).unwrap();
//! assert_eq!(pit.gross_income().to_string(), "6000000");
//!
//! let cit: CitRequest = serde_json::from_str(
//!     r#"{"turnover": 80000000, "assessable_profit": 20000000, "is_professional_services": 0}"#,
//! ).unwrap();
//! assert!(!cit.is_professional_services);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calculations::common::percent_label;
use crate::{CitInput, CitResult, CompanyType, PitInput, PitResult, Sector};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of a `calculate_pit` call.
///
/// Gross income is either given directly as `gross_income`, or summed from
/// the four income sources when `gross_income` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PitRequest {
    pub gross_income: Option<Decimal>,
    pub employment_income: Decimal,
    pub business_profit: Decimal,
    pub investment_income: Decimal,
    pub other_income: Decimal,
    pub pension_contribution: Decimal,
    pub nhf_contribution: Decimal,
    pub nhis_contribution: Decimal,
    pub life_insurance_premium: Decimal,
    pub mortgage_interest: Decimal,
    pub annual_rent_paid: Decimal,
}

impl PitRequest {
    /// The explicit `gross_income`, or the sum of the four income sources
    /// saturating at `Decimal::MAX`.
    pub fn gross_income(&self) -> Decimal {
        self.gross_income.unwrap_or_else(|| {
            [
                self.employment_income,
                self.business_profit,
                self.investment_income,
                self.other_income,
            ]
            .into_iter()
            .fold(Decimal::ZERO, Decimal::saturating_add)
        })
    }
}

impl From<&PitRequest> for PitInput {
    fn from(request: &PitRequest) -> Self {
        PitInput {
            gross_income: request.gross_income(),
            pension_contribution: request.pension_contribution,
            nhf_contribution: request.nhf_contribution,
            nhis_contribution: request.nhis_contribution,
            life_insurance_premium: request.life_insurance_premium,
            mortgage_interest: request.mortgage_interest,
            annual_rent_paid: request.annual_rent_paid,
        }
    }
}

/// Body of a `calculate_cit` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CitRequest {
    #[serde(alias = "turnover")]
    pub gross_turnover: Decimal,
    #[serde(alias = "fixed_assets")]
    pub total_fixed_assets: Decimal,
    pub assessable_profit: Decimal,
    /// `true`/`false`, or the numeric form where `1` means professional services.
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_professional_services: bool,
}

impl From<&CitRequest> for CitInput {
    fn from(request: &CitRequest) -> Self {
        CitInput {
            gross_turnover: request.gross_turnover,
            total_fixed_assets: request.total_fixed_assets,
            assessable_profit: request.assessable_profit,
            sector: Sector::from_professional_services_flag(request.is_professional_services),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(f64),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(flag) => flag,
        FlagRepr::Number(n) => n == 1.0,
        FlagRepr::Text(s) => matches!(s.trim(), "1" | "true"),
    })
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandLine {
    pub band: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub chargeable_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub capped_rent_relief: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    pub tax_breakdown: Vec<BandLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_payable: Decimal,
}

impl From<&PitResult> for PitResponse {
    fn from(result: &PitResult) -> Self {
        PitResponse {
            gross_income: result.gross_income,
            chargeable_income: result.chargeable_income,
            capped_rent_relief: result.capped_rent_relief,
            total_deductions: result.total_deductions,
            tax_breakdown: result
                .tax_breakdown
                .iter()
                .map(|entry| BandLine {
                    band: entry.band_label.clone(),
                    tax: entry.tax_amount,
                })
                .collect(),
            tax_payable: result.tax_payable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitResponse {
    pub company_type: CompanyType,
    #[serde(with = "rust_decimal::serde::float")]
    pub assessable_profit: Decimal,
    pub tax_rate_percent: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub company_income_tax: Decimal,
    pub dev_levy_percent: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub development_levy: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax_payable: Decimal,
}

impl From<&CitResult> for CitResponse {
    fn from(result: &CitResult) -> Self {
        CitResponse {
            company_type: result.company_type,
            assessable_profit: result.assessable_profit,
            tax_rate_percent: percent_label(result.tax_rate),
            company_income_tax: result.company_income_tax,
            dev_levy_percent: percent_label(result.dev_levy_rate),
            development_levy: result.development_levy,
            total_tax_payable: result.total_tax_payable,
        }
    }
}
