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

//! Result records handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::table::PriceTable;

/// Descriptive statistics of a price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Population standard deviation (divisor = count)
    pub std_price: f64,
    /// std / mean, only when mean != 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeff_var: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_demand: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_demand: Option<f64>,
}

impl PriceSummary {
    /// Flattened key/value view, absent statistics omitted
    #[expect(
        clippy::cast_precision_loss,
        reason = "row counts stay far below f64 mantissa precision"
    )]
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut entries = vec![
            ("count", self.count as f64),
            ("mean_price", self.mean_price),
            ("median_price", self.median_price),
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("std_price", self.std_price),
        ];
        let optional = [
            ("coeff_var", self.coeff_var),
            ("mean_demand", self.mean_demand),
            ("max_demand", self.max_demand),
        ];
        entries.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        entries
    }
}

/// Cutoff and event statistics of a spike scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeStats {
    /// Price at or above which a row counts as a spike
    pub cutoff: f64,
    pub spike_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spike: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_spike: Option<f64>,
}

/// Spike events plus their statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeReport {
    pub events: PriceTable,
    pub stats: SpikeStats,
}

/// Outcome of a battery arbitrage backtest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Revenue minus charging cost
    pub total_profit: f64,
    pub charge_events: usize,
    pub discharge_events: usize,
    /// min(charge_events, discharge_events)
    pub cycles: usize,
    /// Energy bought from the grid (MWh)
    pub energy_from_grid: f64,
    /// Energy sold to the grid after efficiency losses (MWh)
    pub energy_to_grid: f64,
    pub low_threshold: f64,
    pub high_threshold: f64,
    /// Interval length inferred from the data (hours)
    pub interval_hours: f64,
}
