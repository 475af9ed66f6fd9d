//! Request and response shapes agreed with the presentation boundary.
//!
//! Each contract version lives in its own module. Renaming or reshaping a
//! field is a breaking change and belongs in a new `vN` module; existing
//! modules only change to fix bugs.

pub mod v1;

/// The contract version served by default.
pub const VERSION: &str = "v1";
