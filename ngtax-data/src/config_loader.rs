use std::fs;
use std::path::{Path, PathBuf};

use ngtax_core::{ConfigSchedule, InvalidConfiguration, TaxYearConfig};
use thiserror::Error;
use tracing::{debug, info};

/// The Nigeria Tax Act 2025 configuration shipped with the crate.
pub const BUILTIN_CONFIG_TOML: &str = include_str!("../data/nigeria_2026.toml");

/// Errors that can occur when loading tax-year configuration.
#[derive(Debug, Error)]
pub enum ConfigLoaderError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] InvalidConfiguration),

    #[error("no .toml configuration files in '{}'", .0.display())]
    EmptyDirectory(PathBuf),
}

impl From<toml::de::Error> for ConfigLoaderError {
    fn from(err: toml::de::Error) -> Self {
        ConfigLoaderError::TomlParse(err.to_string())
    }
}

/// Loader for tax-year configuration documents.
///
/// A document is a TOML rendering of [`TaxYearConfig`]:
///
/// ```toml
/// tax_year = 2026
/// effective_from = "2026-01-01"
///
/// [rent_relief]
/// percentage = "0.20"
/// cap = "500000"
///
/// [cit_thresholds]
/// turnover_cap = "50000000"
/// fixed_asset_cap = "250000000"
/// excluded_sectors = ["professional_services"]
///
/// [cit_rates]
/// small = "0"
/// standard = "0.30"
///
/// [development_levy]
/// rate = "0.04"
///
/// [[pit_bands]]
/// lower_bound = "0"
/// upper_bound = "800000"
/// rate = "0"
///
/// [[pit_bands]]
/// lower_bound = "800000"
/// rate = "0.15"
/// ```
///
/// Every loaded document is validated; an invalid one never comes back as a
/// `TaxYearConfig`.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses and validates a single configuration document.
    pub fn from_toml_str(input: &str) -> Result<TaxYearConfig, ConfigLoaderError> {
        let config: TaxYearConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates the configuration at `path`.
    pub fn from_file(path: &Path) -> Result<TaxYearConfig, ConfigLoaderError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            tax_year = config.tax_year,
            "loaded tax year configuration"
        );
        Ok(config)
    }

    /// Loads every `*.toml` file in `dir` into a [`ConfigSchedule`].
    ///
    /// Files are read in name order; the schedule orders them by effective
    /// date regardless.
    pub fn load_dir(dir: &Path) -> Result<ConfigSchedule, ConfigLoaderError> {
        let io_error = |source| ConfigLoaderError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(ConfigLoaderError::EmptyDirectory(dir.to_path_buf()));
        }

        let configs = paths
            .iter()
            .map(|path| Self::from_file(path))
            .collect::<Result<Vec<_>, _>>()?;
        let schedule = ConfigSchedule::new(configs)?;

        info!(
            dir = %dir.display(),
            configs = schedule.len(),
            "loaded configuration schedule"
        );
        Ok(schedule)
    }
}

/// The built-in Nigeria Tax Act 2025 configuration, effective 2026-01-01.
pub fn builtin_config() -> Result<TaxYearConfig, ConfigLoaderError> {
    ConfigLoader::from_toml_str(BUILTIN_CONFIG_TOML)
}
