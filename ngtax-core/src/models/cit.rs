use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompanyType, Sector};

/// Annual figures for one company income tax computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitInput {
    pub gross_turnover: Decimal,
    pub total_fixed_assets: Decimal,
    pub assessable_profit: Decimal,
    pub sector: Sector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitResult {
    pub company_type: CompanyType,
    pub assessable_profit: Decimal,

    /// CIT rate as a fraction (`0.30` for 30%).
    pub tax_rate: Decimal,
    pub company_income_tax: Decimal,

    /// Development levy rate as a fraction; zero for small companies.
    pub dev_levy_rate: Decimal,
    pub development_levy: Decimal,

    /// `company_income_tax + development_levy`.
    pub total_tax_payable: Decimal,
}
