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

//! NEM Analyzer core
//!
//! Ingestion and analysis of electricity-market price/demand time series.
//!
//! ## Pipeline
//!
//! - **Column resolution**: map arbitrary CSV headers to canonical roles (override, then alias)
//! - **Normalization**: coerce timestamps/numbers, apply timezone rules, validate required fields
//! - **Merging**: combine several sources, drop duplicate (timestamp, region) rows, re-sort
//! - **Analysis**: region/date filtering, summary statistics, spike detection
//! - **Battery backtest**: greedy quantile-threshold arbitrage simulation

pub mod analysis;
pub mod battery;
pub mod csv_source;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod options;
pub mod resolver;
pub mod stats;
pub mod timestamp;

pub use analysis::{detect_spikes, filter, summarize};
pub use battery::battery_backtest;
pub use csv_source::{load_csv, load_csvs, parse_csv, read_source};
pub use error::{AnalyzerError, Result};
pub use merge::{merge_sources, merge_tables};
pub use normalize::normalize;
pub use options::{ColumnOverrides, LoadOptions, SimulationConfig, parse_timezone};
pub use resolver::{ColumnResolver, ResolvedColumn};

// Re-export the data model so callers only need one dependency
pub use nem_types::*;
