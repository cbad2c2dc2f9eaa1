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

//! Filtering, summary statistics and spike detection over a canonical table

use chrono::DateTime;
use chrono_tz::Tz;
use nem_types::{PriceSummary, PriceTable, SpikeReport, SpikeStats};

use crate::error::{AnalyzerError, Result};
use crate::stats;
use crate::timestamp;

fn parse_bound(raw: &str, zone: Option<Tz>) -> Result<DateTime<Tz>> {
    timestamp::coerce(raw, zone).ok_or_else(|| AnalyzerError::InvalidBound(raw.to_owned()))
}

/// Restrict a table to one region and/or an inclusive time window.
///
/// Region matching ignores case; a blank region means no region filter.
/// Bounds accept the same encodings as source timestamps and are aligned to
/// the table's zone before comparison.
pub fn filter(
    table: &PriceTable,
    region: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<PriceTable> {
    let zone = table.zone();
    let start = start.map(|raw| parse_bound(raw, zone)).transpose()?;
    let end = end.map(|raw| parse_bound(raw, zone)).transpose()?;
    let region = region.map(str::trim).filter(|r| !r.is_empty());

    Ok(table.select(|record| {
        region.is_none_or(|r| record.region.eq_ignore_ascii_case(r))
            && start.is_none_or(|s| record.timestamp >= s)
            && end.is_none_or(|e| record.timestamp <= e)
    }))
}

/// Descriptive statistics of price (and demand, when present)
pub fn summarize(table: &PriceTable) -> Result<PriceSummary> {
    let empty = || AnalyzerError::EmptyTable {
        operation: "summarize",
    };

    let prices = stats::sorted(table.prices());
    let (Some(&min_price), Some(&max_price)) = (prices.first(), prices.last()) else {
        return Err(empty());
    };
    let mean_price = stats::mean(&prices).ok_or_else(empty)?;
    let median_price = stats::median(&prices).ok_or_else(empty)?;
    let std_price = stats::population_std(&prices).ok_or_else(empty)?;

    let demands: Vec<f64> = table.demands().collect();
    let max_demand = demands.iter().copied().reduce(f64::max);

    Ok(PriceSummary {
        count: table.len(),
        mean_price,
        median_price,
        min_price,
        max_price,
        std_price,
        coeff_var: (mean_price != 0.0).then(|| std_price / mean_price),
        mean_demand: stats::mean(&demands),
        max_demand,
    })
}

/// Rows priced at or above a cutoff.
///
/// The cutoff is `threshold` when given, otherwise the `quantile` of all
/// prices in the table.
pub fn detect_spikes(
    table: &PriceTable,
    threshold: Option<f64>,
    quantile: Option<f64>,
) -> Result<SpikeReport> {
    if table.is_empty() {
        return Err(AnalyzerError::EmptyTable {
            operation: "detect spikes",
        });
    }

    let cutoff = match (threshold, quantile) {
        (Some(threshold), _) => threshold,
        (None, Some(q)) => {
            if !(0.0..=1.0).contains(&q) {
                return Err(AnalyzerError::InvalidQuantile(q));
            }
            stats::quantile(&stats::sorted(table.prices()), q).ok_or(
                AnalyzerError::EmptyTable {
                    operation: "detect spikes",
                },
            )?
        }
        (None, None) => return Err(AnalyzerError::MissingCriterion),
    };

    let events = table.select(|record| record.price >= cutoff);
    let spike_prices: Vec<f64> = events.prices().collect();

    let stats = SpikeStats {
        cutoff,
        spike_count: events.len(),
        max_spike: spike_prices.iter().copied().reduce(f64::max),
        mean_spike: stats::mean(&spike_prices),
    };
    Ok(SpikeReport { events, stats })
}
