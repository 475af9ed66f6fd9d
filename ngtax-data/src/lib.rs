//! Loading tax-year configuration, PIT band tables and batch inputs.

pub mod band_loader;
pub mod config_loader;
mod decimal_cell;
pub mod input_loader;

pub use band_loader::{PitBandLoader, PitBandLoaderError, PitBandRecord};
pub use config_loader::{BUILTIN_CONFIG_TOML, ConfigLoader, ConfigLoaderError, builtin_config};
pub use input_loader::InputLoadError;
