use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual figures for one personal income tax computation.
///
/// Missing amounts are zero. Negative amounts are clamped to zero by the
/// calculator rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitInput {
    pub gross_income: Decimal,
    pub pension_contribution: Decimal,
    pub nhf_contribution: Decimal,
    pub nhis_contribution: Decimal,
    pub life_insurance_premium: Decimal,
    pub mortgage_interest: Decimal,
    pub annual_rent_paid: Decimal,
}

/// Tax charged in a single band of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    /// Display label such as `Next 1,400,000.00 @ 15%`.
    pub band_label: String,
    pub rate: Decimal,
    /// Chargeable income falling inside the band.
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitResult {
    pub gross_income: Decimal,
    pub capped_rent_relief: Decimal,
    pub total_deductions: Decimal,
    pub chargeable_income: Decimal,

    /// One entry per band with a non-zero taxable portion, in band order.
    /// Empty when chargeable income is zero.
    pub tax_breakdown: Vec<BandTax>,

    /// Always equal to the sum of `tax_breakdown[*].tax_amount`.
    pub tax_payable: Decimal,
}
