// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.

//! TOML configuration: timezone, column overrides and analysis defaults.
//!
//! Every value set on the command line wins over the `[defaults]` table,
//! which in turn wins over the built-in defaults.

use anyhow::{Context, Result};
use nem_core::{ColumnOverrides, LoadOptions, Role, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::args::BatteryParams;

/// Spike quantile used when neither the CLI nor the config provides a criterion
pub const DEFAULT_SPIKE_QUANTILE: f64 = 0.95;

const EXAMPLE_CONFIG: &str = r#"# NEM Analyzer configuration

# IANA zone the timestamps are localized/converted to.
# Use "" to keep timestamps as written in the files.
timezone = "Australia/Brisbane"

# Role -> literal CSV header, for files whose headers are not recognized.
# Roles: timestamp, region, price, demand
[columns]
price = "RRP"

# Defaults for command-line flags; a flag given on the command line wins.
[defaults]
region = "QLD1"
start = "2021-01-01"
end = "2021-12-31"
# threshold = 300.0
quantile = 0.95
low_quantile = 0.25
high_quantile = 0.75
round_trip_efficiency = 0.9
capacity_mwh = 1.0
power_mw = 1.0
"#;

fn default_timezone() -> String {
    "UTC".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Target timezone; empty keeps timestamps zone-naive
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Role name -> literal source header
    #[serde(default)]
    pub columns: BTreeMap<String, String>,

    #[serde(default)]
    pub defaults: AnalysisDefaults,
}

/// Fallbacks for command-line flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    pub region: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub threshold: Option<f64>,
    pub quantile: Option<f64>,
    pub low_quantile: Option<f64>,
    pub high_quantile: Option<f64>,
    pub round_trip_efficiency: Option<f64>,
    pub capacity_mwh: Option<f64>,
    pub power_mw: Option<f64>,
}

/// Region and time window after applying the precedence rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub region: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            columns: BTreeMap::new(),
            defaults: AnalysisDefaults::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid config TOML")?;
        // Surface bad role names early rather than at first load
        config.column_overrides()?;
        Ok(config)
    }

    /// Config from `path`, or the built-in defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    pub fn column_overrides(&self) -> Result<ColumnOverrides> {
        self.columns
            .iter()
            .map(|(role, header)| -> Result<(Role, String)> {
                let role: Role = role
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("[columns]: {e}"))?;
                Ok((role, header.clone()))
            })
            .collect()
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        LoadOptions::new(self.column_overrides()?, Some(&self.timezone))
            .context("Invalid timezone in config")
    }

    #[must_use]
    pub fn example_toml() -> &'static str {
        EXAMPLE_CONFIG
    }
}

impl AnalysisDefaults {
    #[must_use]
    pub fn filters(&self, region: Option<&str>, start: Option<&str>, end: Option<&str>) -> Filters {
        let pick = |cli: Option<&str>, fallback: &Option<String>| {
            cli.map(str::to_owned).or_else(|| fallback.clone())
        };
        Filters {
            region: pick(region, &self.region),
            start: pick(start, &self.start),
            end: pick(end, &self.end),
        }
    }

    /// (threshold, quantile) for spike detection
    ///
    /// The quantile falls back to [`DEFAULT_SPIKE_QUANTILE`], so a criterion is
    /// always available.
    #[must_use]
    pub fn spike_criteria(&self, threshold: Option<f64>, quantile: Option<f64>) -> (Option<f64>, f64) {
        (
            threshold.or(self.threshold),
            quantile.or(self.quantile).unwrap_or(DEFAULT_SPIKE_QUANTILE),
        )
    }

    pub fn simulation_config(&self, cli: &BatteryParams) -> Result<SimulationConfig> {
        let config = SimulationConfig::new(
            cli.low_quantile
                .or(self.low_quantile)
                .unwrap_or(SimulationConfig::DEFAULT_LOW_QUANTILE),
            cli.high_quantile
                .or(self.high_quantile)
                .unwrap_or(SimulationConfig::DEFAULT_HIGH_QUANTILE),
            cli.round_trip_efficiency
                .or(self.round_trip_efficiency)
                .unwrap_or(SimulationConfig::DEFAULT_ROUND_TRIP_EFFICIENCY),
            cli.capacity_mwh
                .or(self.capacity_mwh)
                .unwrap_or(SimulationConfig::DEFAULT_CAPACITY),
            cli.power_mw
                .or(self.power_mw)
                .unwrap_or(SimulationConfig::DEFAULT_POWER),
        )?;
        Ok(config)
    }
}
