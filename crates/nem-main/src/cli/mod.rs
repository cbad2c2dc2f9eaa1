// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.

//! CLI module for the analyzer command-line interface.

pub mod args;
pub mod config;
pub mod formatters;

pub use args::{Cli, Commands, OutputFormat, SourceArgs};
pub use config::AnalyzerConfig;
pub use formatters::{JsonFormatter, TableFormatter};
