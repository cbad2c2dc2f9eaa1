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

//! Greedy threshold battery arbitrage backtest
//!
//! The battery charges whenever the price is at or below the low quantile of
//! the series and discharges whenever it is at or above the high quantile,
//! limited by power per interval and by capacity. Charging is lossless; the
//! round-trip efficiency is applied to the energy sold on discharge.

use chrono::DateTime;
use chrono_tz::Tz;
use nem_types::{BacktestResult, PriceTable};

use crate::error::{AnalyzerError, Result};
use crate::options::SimulationConfig;
use crate::stats;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Running state of one backtest
#[derive(Debug, Default)]
struct BatteryState {
    state_of_charge: f64,
    cost: f64,
    revenue: f64,
    charge_events: usize,
    discharge_events: usize,
    energy_from_grid: f64,
    energy_to_grid: f64,
}

impl BatteryState {
    fn charge(&mut self, price: f64, max_energy: f64, capacity: f64) {
        let energy = max_energy.min(capacity - self.state_of_charge);
        if energy <= 0.0 {
            return;
        }
        self.state_of_charge += energy;
        self.cost += price * energy;
        self.energy_from_grid += energy;
        self.charge_events += 1;
    }

    fn discharge(&mut self, price: f64, max_energy: f64, efficiency: f64) {
        let energy = max_energy.min(self.state_of_charge);
        if energy <= 0.0 {
            return;
        }
        self.state_of_charge -= energy;
        let delivered = energy * efficiency;
        self.revenue += price * delivered;
        self.energy_to_grid += delivered;
        self.discharge_events += 1;
    }
}

/// Median gap between consecutive timestamps in hours, 1.0 when undefined
#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond gaps between market intervals are far below 2^52"
)]
fn interval_hours(timestamps: &[DateTime<Tz>]) -> f64 {
    let gaps = stats::sorted(
        timestamps
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_milliseconds() as f64 / MILLIS_PER_HOUR),
    );
    match stats::median(&gaps) {
        Some(hours) if hours > 0.0 => hours,
        _ => 1.0,
    }
}

/// Run the arbitrage backtest over `table` in chronological order.
///
/// Each row runs the charge check and then the discharge check against the
/// same price, so one interval may do both.
pub fn battery_backtest(table: &PriceTable, config: &SimulationConfig) -> Result<BacktestResult> {
    if table.is_empty() {
        return Err(AnalyzerError::EmptyTable {
            operation: "run a battery backtest",
        });
    }

    let mut series: Vec<(DateTime<Tz>, f64)> = table
        .records()
        .iter()
        .map(|r| (r.timestamp, r.price))
        .collect();
    series.sort_by_key(|(timestamp, _)| *timestamp);

    let empty = || AnalyzerError::EmptyTable {
        operation: "run a battery backtest",
    };
    let sorted_prices = stats::sorted(series.iter().map(|(_, price)| *price));
    let low_threshold = stats::quantile(&sorted_prices, config.low_quantile()).ok_or_else(empty)?;
    let high_threshold =
        stats::quantile(&sorted_prices, config.high_quantile()).ok_or_else(empty)?;

    let timestamps: Vec<DateTime<Tz>> = series.iter().map(|(timestamp, _)| *timestamp).collect();
    let interval_hours = interval_hours(&timestamps);
    let max_energy = config.power() * interval_hours;

    let mut state = BatteryState::default();
    for &(_, price) in &series {
        if price <= low_threshold && state.state_of_charge < config.capacity() {
            state.charge(price, max_energy, config.capacity());
        }
        if price >= high_threshold && state.state_of_charge > 0.0 {
            state.discharge(price, max_energy, config.round_trip_efficiency());
        }
    }

    Ok(BacktestResult {
        total_profit: state.revenue - state.cost,
        charge_events: state.charge_events,
        discharge_events: state.discharge_events,
        cycles: state.charge_events.min(state.discharge_events),
        energy_from_grid: state.energy_from_grid,
        energy_to_grid: state.energy_to_grid,
        low_threshold,
        high_threshold,
        interval_hours,
    })
}
