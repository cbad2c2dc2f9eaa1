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

use chrono_tz::Tz;
use nem_types::Role;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{AnalyzerError, Result};

/// Role -> literal source header; takes priority over the alias tables
pub type ColumnOverrides = BTreeMap<Role, String>;

/// Parse an IANA zone name; empty or blank means "no zone"
pub fn parse_timezone(name: &str) -> Result<Option<Tz>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    name.parse::<Tz>()
        .map(Some)
        .map_err(|_| AnalyzerError::UnknownTimezone(name.to_owned()))
}

/// Options controlling how a source is normalized
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    column_overrides: ColumnOverrides,
    timezone: Option<Tz>,
}

impl LoadOptions {
    /// Validated constructor
    ///
    /// # Arguments
    /// * `column_overrides` - Explicit role -> header mapping
    /// * `timezone` - Target zone name; `None` or empty leaves timestamps zone-naive
    pub fn new(column_overrides: ColumnOverrides, timezone: Option<&str>) -> Result<Self> {
        let timezone = match timezone {
            Some(name) => parse_timezone(name)?,
            None => None,
        };
        Ok(Self {
            column_overrides,
            timezone,
        })
    }

    #[must_use]
    pub fn column_overrides(&self) -> &ColumnOverrides {
        &self.column_overrides
    }

    #[must_use]
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }
}

/// Battery backtest parameters
///
/// Only constructible through [`SimulationConfig::new`] (or `Default`), so an
/// instance always satisfies the numeric constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    low_quantile: f64,
    high_quantile: f64,
    round_trip_efficiency: f64,
    capacity: f64,
    power: f64,
}

impl SimulationConfig {
    pub const DEFAULT_LOW_QUANTILE: f64 = 0.25;
    pub const DEFAULT_HIGH_QUANTILE: f64 = 0.75;
    pub const DEFAULT_ROUND_TRIP_EFFICIENCY: f64 = 0.9;
    pub const DEFAULT_CAPACITY: f64 = 1.0;
    pub const DEFAULT_POWER: f64 = 1.0;

    /// # Arguments
    /// * `low_quantile` - Price quantile at or below which the battery charges
    /// * `high_quantile` - Price quantile at or above which the battery discharges
    /// * `round_trip_efficiency` - Fraction of discharged energy that is sold, in (0, 1]
    /// * `capacity` - Usable energy capacity (MWh)
    /// * `power` - Charge/discharge power limit (MW)
    pub fn new(
        low_quantile: f64,
        high_quantile: f64,
        round_trip_efficiency: f64,
        capacity: f64,
        power: f64,
    ) -> Result<Self> {
        if !(round_trip_efficiency > 0.0 && round_trip_efficiency <= 1.0) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "round_trip_efficiency must be in (0, 1], got {round_trip_efficiency}"
            )));
        }
        if !(0.0 <= low_quantile && low_quantile < high_quantile && high_quantile <= 1.0) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "quantiles must satisfy 0 <= low < high <= 1, got low={low_quantile} high={high_quantile}"
            )));
        }
        if !(capacity > 0.0 && capacity.is_finite()) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "capacity must be > 0, got {capacity}"
            )));
        }
        if !(power > 0.0 && power.is_finite()) {
            return Err(AnalyzerError::InvalidConfig(format!(
                "power must be > 0, got {power}"
            )));
        }

        Ok(Self {
            low_quantile,
            high_quantile,
            round_trip_efficiency,
            capacity,
            power,
        })
    }

    #[must_use]
    pub fn low_quantile(&self) -> f64 {
        self.low_quantile
    }

    #[must_use]
    pub fn high_quantile(&self) -> f64 {
        self.high_quantile
    }

    #[must_use]
    pub fn round_trip_efficiency(&self) -> f64 {
        self.round_trip_efficiency
    }

    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[must_use]
    pub fn power(&self) -> f64 {
        self.power
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            low_quantile: Self::DEFAULT_LOW_QUANTILE,
            high_quantile: Self::DEFAULT_HIGH_QUANTILE,
            round_trip_efficiency: Self::DEFAULT_ROUND_TRIP_EFFICIENCY,
            capacity: Self::DEFAULT_CAPACITY,
            power: Self::DEFAULT_POWER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            parse_timezone("Australia/Melbourne").unwrap(),
            Some(chrono_tz::Australia::Melbourne)
        );
        assert_eq!(parse_timezone("  ").unwrap(), None);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(AnalyzerError::UnknownTimezone(name)) if name == "Mars/Olympus"
        ));
    }

    #[test]
    fn test_load_options_default_is_zone_naive() {
        let options = LoadOptions::default();
        assert!(options.timezone().is_none());
        assert!(options.column_overrides().is_empty());
    }

    #[test]
    fn test_load_options_new() {
        let mut overrides = ColumnOverrides::new();
        overrides.insert(Role::Price, "price_value".to_owned());

        let options = LoadOptions::new(overrides, Some("UTC")).unwrap();
        assert_eq!(options.timezone(), Some(Tz::UTC));
        assert_eq!(
            options.column_overrides().get(&Role::Price).map(String::as_str),
            Some("price_value")
        );

        let naive = LoadOptions::new(ColumnOverrides::new(), Some("")).unwrap();
        assert!(naive.timezone().is_none());
    }

    #[test]
    fn test_simulation_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.low_quantile(), 0.25);
        assert_eq!(config.high_quantile(), 0.75);
        assert_eq!(config.round_trip_efficiency(), 0.9);
        assert_eq!(config.capacity(), 1.0);
        assert_eq!(config.power(), 1.0);
    }

    #[test]
    fn test_simulation_config_rejects_bad_efficiency() {
        for rte in [0.0, -0.1, 1.01, f64::NAN] {
            let err = SimulationConfig::new(0.25, 0.75, rte, 1.0, 1.0).unwrap_err();
            assert!(matches!(err, AnalyzerError::InvalidConfig(msg) if msg.contains("round_trip_efficiency")));
        }
        assert!(SimulationConfig::new(0.25, 0.75, 1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_simulation_config_rejects_bad_quantiles() {
        for (low, high) in [(0.75, 0.25), (0.5, 0.5), (-0.1, 0.5), (0.2, 1.1)] {
            let err = SimulationConfig::new(low, high, 0.9, 1.0, 1.0).unwrap_err();
            assert!(matches!(err, AnalyzerError::InvalidConfig(msg) if msg.contains("quantiles")));
        }
        assert!(SimulationConfig::new(0.0, 1.0, 0.9, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_simulation_config_rejects_non_positive_sizes() {
        assert!(SimulationConfig::new(0.25, 0.75, 0.9, 0.0, 1.0).is_err());
        assert!(SimulationConfig::new(0.25, 0.75, 0.9, 1.0, -2.0).is_err());
    }
}
