//! Company Income Tax and development levy.
//!
//! A company is small when its gross turnover and total fixed assets are both
//! within the configured caps and its sector is not excluded. Small
//! companies pay neither CIT nor the development levy. Every other company
//! pays the standard CIT rate and the levy on its assessable profit.

use tracing::debug;

use crate::calculations::common::{clamp_non_negative, round_half_up};
use crate::{CitInput, CitResult, CompanyClassification, TaxYearConfig};

/// Calculator for company income tax.
#[derive(Debug, Clone, Copy)]
pub struct CitCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> CitCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Classifies the company, then applies the CIT rate and the
    /// development levy to its assessable profit.
    pub fn calculate(
        &self,
        input: &CitInput,
    ) -> CitResult {
        let input = self.normalize(input);
        let classification = self.classify(&input);

        let assessable_profit = input.assessable_profit;
        let tax_rate = classification.tax_rate();
        let dev_levy_rate = classification.levy_rate();

        let company_income_tax = round_half_up(assessable_profit * tax_rate);
        let development_levy = round_half_up(assessable_profit * dev_levy_rate);

        CitResult {
            company_type: classification.company_type(),
            assessable_profit,
            tax_rate,
            company_income_tax,
            dev_levy_rate,
            development_levy,
            total_tax_payable: company_income_tax.saturating_add(development_levy),
        }
    }

    /// Small iff turnover, fixed assets, and sector all qualify.
    pub fn classify(
        &self,
        input: &CitInput,
    ) -> CompanyClassification {
        let thresholds = &self.config.cit_thresholds;
        let within_turnover = input.gross_turnover <= thresholds.turnover_cap;
        let within_assets = input.total_fixed_assets <= thresholds.fixed_asset_cap;
        let eligible_sector = !self.config.is_excluded_sector(input.sector);

        let classification = if within_turnover && within_assets && eligible_sector {
            CompanyClassification::Small
        } else {
            CompanyClassification::MediumLarge {
                tax_rate: self.config.cit_rates.standard,
                levy_rate: self.config.development_levy.rate,
            }
        };

        debug!(
            within_turnover,
            within_assets,
            sector = input.sector.as_str(),
            company_type = %classification.company_type(),
            "classified company"
        );

        classification
    }

    fn normalize(
        &self,
        input: &CitInput,
    ) -> CitInput {
        CitInput {
            gross_turnover: clamp_non_negative("gross_turnover", input.gross_turnover),
            total_fixed_assets: clamp_non_negative(
                "total_fixed_assets",
                input.total_fixed_assets,
            ),
            assessable_profit: clamp_non_negative("assessable_profit", input.assessable_profit),
            sector: input.sector,
        }
    }
}
