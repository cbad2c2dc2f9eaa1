// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nem-analyzer")]
#[command(author, version, about = "Price and demand analyzer for the Australian NEM")]
#[command(
    long_about = "Analyze NEM price/demand CSV exports.\n\
    \nFiles are normalized to a common schema (timestamp, region, price, optional demand)\n\
    whatever their headers, merged in the order given and filtered by region/date.\n\
    \nExamples:\n  \
    nem-analyzer analyze PRICE_AND_DEMAND_202101_VIC1.csv\n  \
    nem-analyzer spikes data/*.csv --region NSW1 --threshold 300\n  \
    nem-analyzer battery-backtest data/*.csv --config nem.toml"
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute summary statistics for one or more CSV files
    Analyze(AnalyzeArgs),

    /// List price spike events
    #[command(
        long_about = "List rows priced at or above a cutoff.\n\
        \nThe cutoff is --threshold when given, otherwise the --quantile of all prices\n\
        after filtering (default 0.95).\n\
        \nExamples:\n  \
        nem-analyzer spikes prices.csv --threshold 300\n  \
        nem-analyzer spikes prices.csv --quantile 0.99 --region SA1"
    )]
    Spikes(SpikesArgs),

    /// Run the greedy battery arbitrage backtest
    #[command(
        long_about = "Simulate a battery that charges at or below the low price quantile and\n\
        discharges at or above the high quantile, limited by power and capacity.\n\
        \nExamples:\n  \
        nem-analyzer battery-backtest prices.csv\n  \
        nem-analyzer battery-backtest prices.csv --capacity-mwh 2 --power-mw 0.5"
    )]
    BatteryBacktest(BacktestArgs),

    /// Print an example TOML configuration file
    ExampleConfig,
}

/// Input files, filters and loading options shared by every analysis command
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// CSV files to load, merged in the order given
    #[arg(required = true, value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Filter by region code (e.g. VIC1)
    #[arg(long)]
    pub region: Option<String>,

    /// Inclusive start datetime (e.g. 2021-01-01)
    #[arg(long)]
    pub start: Option<String>,

    /// Inclusive end datetime (e.g. 2021-12-31)
    #[arg(long)]
    pub end: Option<String>,

    /// Optional TOML config with timezone, column overrides and defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep duplicate timestamp/region rows across files
    #[arg(long, default_value_t = false)]
    pub keep_duplicates: bool,

    /// How to print results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct SpikesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Absolute price threshold for spikes ($/MWh); wins over --quantile
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Price quantile used as the cutoff (0-1)
    #[arg(long)]
    pub quantile: Option<f64>,
}

/// Battery parameters; unset values fall back to the config file, then to built-in defaults
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct BatteryParams {
    /// Price quantile at or below which the battery charges [default: 0.25]
    #[arg(long)]
    pub low_quantile: Option<f64>,

    /// Price quantile at or above which the battery discharges [default: 0.75]
    #[arg(long)]
    pub high_quantile: Option<f64>,

    /// Fraction of discharged energy that is sold [default: 0.9]
    #[arg(long)]
    pub round_trip_efficiency: Option<f64>,

    /// Usable battery capacity in MWh [default: 1.0]
    #[arg(long)]
    pub capacity_mwh: Option<f64>,

    /// Charge/discharge power limit in MW [default: 1.0]
    #[arg(long)]
    pub power_mw: Option<f64>,
}

#[derive(Debug, Args)]
pub struct BacktestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub battery: BatteryParams,
}
