//! PIT and CIT calculators.
//!
//! Both calculators follow the same shape: normalise the input, apply
//! reliefs or classification, apply rates, and assemble a result value. They
//! are pure functions of their input and a [`TaxYearConfig`].

pub mod cit;
pub mod common;
pub mod pit;

pub use cit::CitCalculator;
pub use pit::PitCalculator;

use crate::{CitInput, CitResult, PitInput, PitResult, TaxYearConfig};

/// Computes personal income tax for `input` under `config`.
pub fn compute_pit(
    input: &PitInput,
    config: &TaxYearConfig,
) -> PitResult {
    PitCalculator::new(config).calculate(input)
}

/// Computes company income tax and development levy for `input` under `config`.
pub fn compute_cit(
    input: &CitInput,
    config: &TaxYearConfig,
) -> CitResult {
    CitCalculator::new(config).calculate(input)
}
