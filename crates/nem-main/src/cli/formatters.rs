// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.

//! Output formatters for analysis results.

use anyhow::Result;
use comfy_table::{Attribute, Cell, CellAlignment, Table, presets::UTF8_FULL};
use nem_core::{BacktestResult, CanonicalRecord, PriceSummary, PriceTable, SpikeReport};
use serde_json::json;

/// Spike events shown in the table output
pub const SPIKE_PREVIEW_ROWS: usize = 5;

/// Formatter for pretty terminal tables
#[derive(Debug)]
pub struct TableFormatter;

/// Formatter for machine-readable JSON
#[derive(Debug)]
pub struct JsonFormatter;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn metric_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header(&["Metric", "Value"]));
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Timestamp in the table's zone, or the source wall-clock for zone-naive tables
fn display_time(table: &PriceTable, record: &CanonicalRecord) -> String {
    if table.zone().is_some() {
        record.timestamp.format("%Y-%m-%d %H:%M:%S %:z").to_string()
    } else {
        record.wall_clock().format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl TableFormatter {
    pub fn format_summary(summary: &PriceSummary) -> String {
        let rows: Vec<(&str, String)> = summary
            .entries()
            .into_iter()
            .map(|(key, value)| {
                let text = if key == "count" {
                    summary.count.to_string()
                } else {
                    format!("{value:.4}")
                };
                (key, text)
            })
            .collect();

        format!("Summary statistics:\n{}\n", metric_table(&rows))
    }

    pub fn format_spikes(report: &SpikeReport) -> String {
        let stats = &report.stats;
        let mut output = String::new();

        let mut rows = vec![
            ("cutoff", format!("{:.2}", stats.cutoff)),
            ("spike_count", stats.spike_count.to_string()),
        ];
        if let (Some(max), Some(mean)) = (stats.max_spike, stats.mean_spike) {
            rows.push(("max_spike", format!("{max:.2}")));
            rows.push(("mean_spike", format!("{mean:.2}")));
        }
        output.push_str(&metric_table(&rows).to_string());
        output.push('\n');

        if report.events.is_empty() {
            output.push_str("No spikes detected.\n");
            return output;
        }

        let mut events = Table::new();
        events.load_preset(UTF8_FULL);
        events.set_header(header(&["Timestamp", "Region", "Price ($/MWh)"]));
        for record in report.events.records().iter().take(SPIKE_PREVIEW_ROWS) {
            events.add_row(vec![
                Cell::new(display_time(&report.events, record)),
                Cell::new(&record.region),
                Cell::new(format!("{:.2}", record.price)).set_alignment(CellAlignment::Right),
            ]);
        }

        let shown = report.events.len().min(SPIKE_PREVIEW_ROWS);
        output.push_str(&format!(
            "\nSpike events (first {shown} of {}):\n{events}\n",
            report.events.len()
        ));
        output
    }

    pub fn format_backtest(result: &BacktestResult) -> String {
        let rows = [
            ("Profit", format!("{:.2}", result.total_profit)),
            ("Cycles", result.cycles.to_string()),
            ("Charge events", result.charge_events.to_string()),
            ("Discharge events", result.discharge_events.to_string()),
            ("Energy from grid (MWh)", format!("{:.3}", result.energy_from_grid)),
            ("Energy to grid (MWh)", format!("{:.3}", result.energy_to_grid)),
            ("Low threshold", format!("{:.2}", result.low_threshold)),
            ("High threshold", format!("{:.2}", result.high_threshold)),
            ("Interval hours", format!("{:.3}", result.interval_hours)),
        ];

        format!("Battery backtest results:\n{}\n", metric_table(&rows))
    }
}

impl JsonFormatter {
    pub fn format_summary(summary: &PriceSummary) -> Result<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    pub fn format_spikes(report: &SpikeReport) -> Result<String> {
        let value = json!({
            "stats": report.stats,
            "events": report.events.records(),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    pub fn format_backtest(result: &BacktestResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}
