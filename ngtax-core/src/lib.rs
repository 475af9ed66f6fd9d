//! Nigerian personal and company income tax computation engine.
//!
//! The engine is a set of pure functions over an immutable
//! [`TaxYearConfig`]. [`TaxEngine`] validates a configuration once and then
//! serves any number of concurrent calculations from it.

pub mod calculations;
pub mod contract;
pub mod engine;
pub mod models;
pub mod schedule;

#[cfg(test)]
mod test_support;

pub use calculations::{compute_cit, compute_pit};
pub use engine::TaxEngine;
pub use models::*;
pub use schedule::ConfigSchedule;
