use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian personal and company income tax calculator.
///
/// Computes PIT and CIT under the Nigeria Tax Act 2025 (or any tax-year
/// configuration you supply) and prints the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "ngtax", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOptions,

    /// Log filter: a level (error, warn, info, debug, trace) or an
    /// EnvFilter directive. Defaults to RUST_LOG, then info.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the tax-year configuration comes from.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOptions {
    /// Tax-year configuration file (TOML). Defaults to the built-in 2025 Act.
    #[arg(long, global = true, conflicts_with = "config_dir")]
    pub config: Option<PathBuf>,

    /// Directory of tax-year configurations; the one in effect on `--on` is used.
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Date for configuration lookup in `--config-dir` (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, requires = "config_dir")]
    pub on: Option<NaiveDate>,

    /// CSV of PIT bands replacing the configuration's band table.
    #[arg(long, global = true)]
    pub bands: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Personal income tax for one taxpayer.
    Pit(PitArgs),

    /// Company income tax and development levy for one company.
    Cit(CitArgs),

    /// One JSON result per line for every row of a CSV file.
    Batch {
        kind: BatchKind,

        /// CSV file of inputs.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Validate the active configuration and print a summary of it.
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BatchKind {
    Pit,
    Cit,
}

/// PIT input, either as a JSON request file or as amount flags.
///
/// Amounts accept comma thousands separators, e.g. `5,000,000`.
#[derive(Debug, Default, Args)]
pub struct PitArgs {
    /// JSON request body (`-` for stdin).
    #[arg(long, conflicts_with_all = [
        "gross_income", "employment_income", "business_profit", "investment_income",
        "other_income", "pension_contribution", "nhf_contribution", "nhis_contribution",
        "life_insurance_premium", "mortgage_interest", "annual_rent_paid",
    ])]
    pub input: Option<PathBuf>,

    /// Total gross income; replaces the sum of the four income sources.
    #[arg(long, value_parser = parse_decimal)]
    pub gross_income: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub employment_income: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub business_profit: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub investment_income: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub other_income: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub pension_contribution: Option<Decimal>,

    /// National Housing Fund contribution.
    #[arg(long, value_parser = parse_decimal)]
    pub nhf_contribution: Option<Decimal>,

    /// National Health Insurance contribution.
    #[arg(long, value_parser = parse_decimal)]
    pub nhis_contribution: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub life_insurance_premium: Option<Decimal>,

    /// Interest on a mortgage for an owner-occupied residence.
    #[arg(long, value_parser = parse_decimal)]
    pub mortgage_interest: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub annual_rent_paid: Option<Decimal>,
}

/// CIT input, either as a JSON request file or as flags.
#[derive(Debug, Default, Args)]
pub struct CitArgs {
    /// JSON request body (`-` for stdin).
    #[arg(long, conflicts_with_all = [
        "turnover", "fixed_assets", "assessable_profit", "professional_services",
    ])]
    pub input: Option<PathBuf>,

    /// Gross turnover for the year.
    #[arg(long, value_parser = parse_decimal)]
    pub turnover: Option<Decimal>,

    /// Total fixed assets.
    #[arg(long, value_parser = parse_decimal)]
    pub fixed_assets: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    pub assessable_profit: Option<Decimal>,

    /// The company provides professional services (never small).
    #[arg(long)]
    pub professional_services: bool,
}
