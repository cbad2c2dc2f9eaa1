// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! NEM Analyzer - entry point for the `nem-analyzer` binary
//!
//! Thin wrapper over `nem-core`: resolves configuration, loads and filters
//! the input files, runs one analysis and prints the result to stdout.
//! Logs go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::args::{AnalyzeArgs, BacktestArgs, SpikesArgs};
use cli::{AnalyzerConfig, Cli, Commands, JsonFormatter, OutputFormat, SourceArgs, TableFormatter};
use nem_core::PriceTable;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "nem_analyzer=debug,nem_core=debug"
    } else {
        "nem_analyzer=info,nem_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load, merge and filter the input files of a command
fn load_table(source: &SourceArgs, config: &AnalyzerConfig) -> Result<PriceTable> {
    let options = config.load_options()?;
    let table = nem_core::load_csvs(&source.paths, &options, !source.keep_duplicates)
        .context("Failed to load price data")?;

    let filters = config.defaults.filters(
        source.region.as_deref(),
        source.start.as_deref(),
        source.end.as_deref(),
    );
    debug!(
        region = ?filters.region,
        start = ?filters.start,
        end = ?filters.end,
        "Applying filters"
    );
    let filtered = nem_core::filter(
        &table,
        filters.region.as_deref(),
        filters.start.as_deref(),
        filters.end.as_deref(),
    )
    .context("Failed to apply filters")?;

    info!(rows = filtered.len(), total = table.len(), "Rows selected for analysis");
    Ok(filtered)
}

fn run_analyze(args: &AnalyzeArgs) -> Result<String> {
    let config = AnalyzerConfig::load(args.source.config.as_deref())?;
    let table = load_table(&args.source, &config)?;
    let summary = nem_core::summarize(&table)?;

    match args.source.format {
        OutputFormat::Table => Ok(TableFormatter::format_summary(&summary)),
        OutputFormat::Json => JsonFormatter::format_summary(&summary),
    }
}

fn run_spikes(args: &SpikesArgs) -> Result<String> {
    let config = AnalyzerConfig::load(args.source.config.as_deref())?;
    let (threshold, quantile) = config.defaults.spike_criteria(args.threshold, args.quantile);
    let table = load_table(&args.source, &config)?;
    let report = nem_core::detect_spikes(&table, threshold, Some(quantile))?;
    info!(
        cutoff = report.stats.cutoff,
        spikes = report.stats.spike_count,
        "Spike detection complete"
    );

    match args.source.format {
        OutputFormat::Table => Ok(TableFormatter::format_spikes(&report)),
        OutputFormat::Json => JsonFormatter::format_spikes(&report),
    }
}

fn run_backtest(args: &BacktestArgs) -> Result<String> {
    let config = AnalyzerConfig::load(args.source.config.as_deref())?;
    let simulation = config
        .defaults
        .simulation_config(&args.battery)
        .context("Invalid battery parameters")?;
    let table = load_table(&args.source, &config)?;
    let result = nem_core::battery_backtest(&table, &simulation)?;
    info!(
        profit = result.total_profit,
        cycles = result.cycles,
        "Battery backtest complete"
    );

    match args.source.format {
        OutputFormat::Table => Ok(TableFormatter::format_backtest(&result)),
        OutputFormat::Json => JsonFormatter::format_backtest(&result),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = match &cli.command {
        Commands::Analyze(args) => run_analyze(args)?,
        Commands::Spikes(args) => run_spikes(args)?,
        Commands::BatteryBacktest(args) => run_backtest(args)?,
        Commands::ExampleConfig => AnalyzerConfig::example_toml().to_owned(),
    };
    println!("{}", output.trim_end());
    Ok(())
}
