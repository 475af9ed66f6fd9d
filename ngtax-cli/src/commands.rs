//! Subcommand implementations.
//!
//! Every command returns the text destined for stdout; `main` prints it.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use ngtax_core::calculations::common::{format_amount, percent_label};
use ngtax_core::contract;
use ngtax_core::contract::v1::{CitRequest, PitRequest};
use ngtax_core::{ConfigSchedule, TaxEngine, TaxYearConfig};
use ngtax_data::{ConfigLoader, PitBandLoader, builtin_config, input_loader};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cli::{BatchKind, CitArgs, Cli, Command, ConfigOptions, PitArgs};

pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Pit(args) => {
            let engine = build_engine(&cli.config)?;
            let request = pit_request(args)?;
            to_json(&engine.calculate_pit(&request))
        }
        Command::Cit(args) => {
            let engine = build_engine(&cli.config)?;
            let request = cit_request(args)?;
            to_json(&engine.calculate_cit(&request))
        }
        Command::Batch { kind, file } => {
            let engine = build_engine(&cli.config)?;
            batch(&engine, *kind, file)
        }
        Command::CheckConfig => check_config(&cli.config),
    }
}

// ─── configuration ───────────────────────────────────────────────────────────

/// Resolves the configuration named by the options, applies any band
/// override, and publishes it.
pub fn build_engine(options: &ConfigOptions) -> Result<TaxEngine> {
    resolve(options).map(|(engine, _)| engine)
}

/// The engine for the options, plus the schedule it was picked from when
/// `--config-dir` is set.
fn resolve(options: &ConfigOptions) -> Result<(TaxEngine, Option<ConfigSchedule>)> {
    let (config, schedule) = match &options.config_dir {
        Some(dir) => {
            let schedule = ConfigLoader::load_dir(dir)
                .with_context(|| format!("Failed to load configurations from: {}", dir.display()))?;
            let date = options.on.unwrap_or_else(|| Local::now().date_naive());
            let engine = schedule.active_on(date).with_context(|| {
                format!(
                    "no configuration in {} is effective on {date}",
                    dir.display()
                )
            })?;
            (engine.config().clone(), Some(schedule))
        }
        None => (single_config(options)?, None),
    };

    let config = apply_band_override(config, options.bands.as_deref())?;
    let engine = TaxEngine::new(config).context("invalid tax year configuration")?;
    Ok((engine, schedule))
}

fn single_config(options: &ConfigOptions) -> Result<TaxYearConfig> {
    match &options.config {
        Some(path) => ConfigLoader::from_file(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => builtin_config().context("Failed to load built-in configuration"),
    }
}

fn apply_band_override(
    config: TaxYearConfig,
    bands_path: Option<&Path>,
) -> Result<TaxYearConfig> {
    let Some(bands_path) = bands_path else {
        return Ok(config);
    };

    let file = File::open(bands_path)
        .with_context(|| format!("Failed to open: {}", bands_path.display()))?;
    let records = PitBandLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", bands_path.display()))?;
    debug!(records = records.len(), "parsed PIT band records");

    PitBandLoader::apply_to(config, &records)
        .with_context(|| format!("Failed to apply PIT bands from: {}", bands_path.display()))
}

// ─── requests ────────────────────────────────────────────────────────────────

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("Failed to read request from stdin")?
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid request JSON in: {}", path.display()))
}

pub fn pit_request(args: &PitArgs) -> Result<PitRequest> {
    if let Some(path) = &args.input {
        return read_request(path);
    }

    Ok(PitRequest {
        gross_income: args.gross_income,
        employment_income: args.employment_income.unwrap_or_default(),
        business_profit: args.business_profit.unwrap_or_default(),
        investment_income: args.investment_income.unwrap_or_default(),
        other_income: args.other_income.unwrap_or_default(),
        pension_contribution: args.pension_contribution.unwrap_or_default(),
        nhf_contribution: args.nhf_contribution.unwrap_or_default(),
        nhis_contribution: args.nhis_contribution.unwrap_or_default(),
        life_insurance_premium: args.life_insurance_premium.unwrap_or_default(),
        mortgage_interest: args.mortgage_interest.unwrap_or_default(),
        annual_rent_paid: args.annual_rent_paid.unwrap_or_default(),
    })
}

pub fn cit_request(args: &CitArgs) -> Result<CitRequest> {
    if let Some(path) = &args.input {
        return read_request(path);
    }

    Ok(CitRequest {
        gross_turnover: args.turnover.unwrap_or_default(),
        total_fixed_assets: args.fixed_assets.unwrap_or_default(),
        assessable_profit: args.assessable_profit.unwrap_or_default(),
        is_professional_services: args.professional_services,
    })
}

// ─── output ──────────────────────────────────────────────────────────────────

fn to_json<T: Serialize>(response: &T) -> Result<String> {
    serde_json::to_string_pretty(response).context("Failed to serialize response")
}

fn batch(
    engine: &TaxEngine,
    kind: BatchKind,
    file: &Path,
) -> Result<String> {
    let lines = match kind {
        BatchKind::Pit => input_loader::load_pit_requests_from_file(file)
            .with_context(|| format!("Failed to load PIT inputs: {}", file.display()))?
            .iter()
            .map(|request| serde_json::to_string(&engine.calculate_pit(request)))
            .collect::<Result<Vec<_>, _>>()?,
        BatchKind::Cit => input_loader::load_cit_requests_from_file(file)
            .with_context(|| format!("Failed to load CIT inputs: {}", file.display()))?
            .iter()
            .map(|request| serde_json::to_string(&engine.calculate_cit(request)))
            .collect::<Result<Vec<_>, _>>()?,
    };

    info!(rows = lines.len(), kind = ?kind, "batch complete");
    Ok(lines.join("\n"))
}

fn check_config(options: &ConfigOptions) -> Result<String> {
    let (engine, schedule) = resolve(options)?;

    let mut out = String::new();
    write_summary(&mut out, engine.config()).context("Failed to format summary")?;
    if let Some(schedule) = &schedule {
        write_schedule(&mut out, schedule).context("Failed to format summary")?;
    }
    Ok(out)
}

/// Human-readable summary of a validated configuration.
pub fn summarize(config: &TaxYearConfig) -> Result<String> {
    let mut out = String::new();
    write_summary(&mut out, config).context("Failed to format summary")?;
    Ok(out)
}

fn write_summary(
    out: &mut impl fmt::Write,
    config: &TaxYearConfig,
) -> fmt::Result {
    writeln!(
        out,
        "Tax year {} (effective from {})",
        config.tax_year, config.effective_from
    )?;

    writeln!(out, "PIT bands:")?;
    for band in &config.pit_bands {
        let range = match band.upper_bound {
            Some(upper) => format!(
                "{} - {}",
                format_amount(band.lower_bound),
                format_amount(upper)
            ),
            None => format!("{} and above", format_amount(band.lower_bound)),
        };
        writeln!(out, "  {range} @ {}", percent_label(band.rate))?;
    }

    writeln!(
        out,
        "Rent relief: {} of rent paid, capped at {}",
        percent_label(config.rent_relief.percentage),
        format_amount(config.rent_relief.cap)
    )?;

    let thresholds = &config.cit_thresholds;
    let excluded: Vec<&str> = thresholds
        .excluded_sectors
        .iter()
        .map(|s| s.as_str())
        .collect();
    writeln!(
        out,
        "Small company: turnover <= {}, fixed assets <= {}, excluded sectors: {}",
        format_amount(thresholds.turnover_cap),
        format_amount(thresholds.fixed_asset_cap),
        if excluded.is_empty() {
            "none".to_string()
        } else {
            excluded.join(", ")
        }
    )?;
    writeln!(
        out,
        "CIT rate: {} (small companies {})",
        percent_label(config.cit_rates.standard),
        percent_label(config.cit_rates.small)
    )?;
    writeln!(
        out,
        "Development levy: {}",
        percent_label(config.development_levy.rate)
    )?;
    write!(out, "Contract version: {}", contract::VERSION)
}

fn write_schedule(
    out: &mut impl fmt::Write,
    schedule: &ConfigSchedule,
) -> fmt::Result {
    let dates: Vec<String> = schedule
        .effective_dates()
        .iter()
        .map(|date| date.to_string())
        .collect();
    write!(
        out,
        "\nSchedule: {} configurations effective from {}",
        schedule.len(),
        dates.join(", ")
    )?;
    if let Some(latest) = schedule.latest() {
        write!(out, " (latest: tax year {})", latest.config().tax_year)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn pit_flags_build_request() {
        let args = PitArgs {
            employment_income: Some(dec!(5000000)),
            business_profit: Some(dec!(1000000)),
            annual_rent_paid: Some(dec!(1200000)),
            ..PitArgs::default()
        };

        let request = pit_request(&args).unwrap();

        assert_eq!(request.gross_income, None);
        assert_eq!(request.gross_income(), dec!(6000000));
        assert_eq!(request.annual_rent_paid, dec!(1200000));
        assert_eq!(request.pension_contribution, dec!(0));
    }

    #[test]
    fn cit_flags_build_request() {
        let args = CitArgs {
            turnover: Some(dec!(80000000)),
            assessable_profit: Some(dec!(20000000)),
            professional_services: true,
            ..CitArgs::default()
        };

        let request = cit_request(&args).unwrap();

        assert_eq!(
            request,
            CitRequest {
                gross_turnover: dec!(80000000),
                total_fixed_assets: dec!(0),
                assessable_profit: dec!(20000000),
                is_professional_services: true,
            }
        );
    }

    #[test]
    fn default_options_use_builtin_config() {
        let engine = build_engine(&ConfigOptions::default()).unwrap();

        assert_eq!(engine.config().tax_year, 2026);
    }

    #[test]
    fn summary_lists_every_band() {
        let config = builtin_config().unwrap();

        let summary = summarize(&config).unwrap();

        assert_eq!(
            summary,
            "\
Tax year 2026 (effective from 2026-01-01)
PIT bands:
  0.00 - 800,000.00 @ 0%
  800,000.00 - 2,200,000.00 @ 15%
  2,200,000.00 - 9,000,000.00 @ 18%
  9,000,000.00 - 13,000,000.00 @ 21%
  13,000,000.00 - 25,000,000.00 @ 23%
  25,000,000.00 and above @ 25%
Rent relief: 20% of rent paid, capped at 500,000.00
Small company: turnover <= 50,000,000.00, fixed assets <= 250,000,000.00, excluded sectors: professional_services
CIT rate: 30% (small companies 0%)
Development levy: 4%
Contract version: v1"
        );
    }
}
