use std::sync::Arc;

use tracing::info;

use crate::calculations::{CitCalculator, PitCalculator};
use crate::contract::v1::{CitRequest, CitResponse, PitRequest, PitResponse};
use crate::{CitInput, CitResult, InvalidConfiguration, PitInput, PitResult, TaxYearConfig};

/// A validated, published tax-year configuration and the calculators over it.
///
/// Cloning is cheap and clones share the same configuration, so one engine
/// can be handed to any number of threads or request handlers.
///
/// # Example
///
/// ```
/// # use chrono::NaiveDate;
/// # use rust_decimal_macros::dec;
/// # use ngtax_core::{CitRates, CitThresholds, DevLevyRule, PitBand, RentReliefRule, TaxYearConfig};
/// use ngtax_core::TaxEngine;
/// use ngtax_core::contract::v1::CitRequest;
///
/// # let config = TaxYearConfig {
/// #     tax_year: 2026,
/// #     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
/// #     pit_bands: vec![PitBand { lower_bound: dec!(0), upper_bound: None, rate: dec!(0.1) }],
/// #     rent_relief: RentReliefRule { percentage: dec!(0.20), cap: dec!(500000) },
/// #     cit_thresholds: CitThresholds {
/// #         turnover_cap: dec!(50000000),
/// #         fixed_asset_cap: dec!(250000000),
/// #         excluded_sectors: vec![],
/// #     },
/// #     cit_rates: CitRates { small: dec!(0), standard: dec!(0.30) },
/// #     development_levy: DevLevyRule { rate: dec!(0.04) },
/// # };
/// let engine = TaxEngine::new(config).expect("valid configuration");
///
/// let response = engine.calculate_cit(&CitRequest {
///     gross_turnover: dec!(80000000),
///     assessable_profit: dec!(20000000),
///     ..CitRequest::default()
/// });
///
/// assert_eq!(response.total_tax_payable, dec!(6800000));
/// assert_eq!(response.tax_rate_percent, "30%");
/// ```
#[derive(Debug, Clone)]
pub struct TaxEngine {
    config: Arc<TaxYearConfig>,
}

impl TaxEngine {
    /// Validates `config` and publishes it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfiguration`] if the band table or any rate or cap
    /// is invalid. No engine exists for an invalid configuration.
    pub fn new(config: TaxYearConfig) -> Result<Self, InvalidConfiguration> {
        config.validate()?;
        Ok(Self::from_validated(Arc::new(config)))
    }

    /// Wraps a configuration that has already passed validation.
    pub(crate) fn from_validated(config: Arc<TaxYearConfig>) -> Self {
        info!(
            tax_year = config.tax_year,
            effective_from = %config.effective_from,
            bands = config.pit_bands.len(),
            "tax year configuration published"
        );
        Self { config }
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    pub fn compute_pit(
        &self,
        input: &PitInput,
    ) -> PitResult {
        PitCalculator::new(&self.config).calculate(input)
    }

    pub fn compute_cit(
        &self,
        input: &CitInput,
    ) -> CitResult {
        CitCalculator::new(&self.config).calculate(input)
    }

    /// `calculate_pit` operation: request body in, contract response out.
    pub fn calculate_pit(
        &self,
        request: &PitRequest,
    ) -> PitResponse {
        PitResponse::from(&self.compute_pit(&PitInput::from(request)))
    }

    /// `calculate_cit` operation: request body in, contract response out.
    pub fn calculate_cit(
        &self,
        request: &CitRequest,
    ) -> CitResponse {
        CitResponse::from(&self.compute_cit(&CitInput::from(request)))
    }
}
