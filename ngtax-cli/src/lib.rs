//! Command-line front end for the `ngtax` calculators.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod utils;

pub use cli::Cli;
