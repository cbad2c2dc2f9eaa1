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

//! CSV files -> merge -> filter -> summary / spikes / backtest

use chrono::{Duration, NaiveDate, NaiveDateTime};
use nem_core::{
    AnalyzerError, ColumnOverrides, LoadOptions, SimulationConfig, battery_backtest,
    detect_spikes, filter, load_csvs, summarize,
};
use nem_integration_tests::{aemo_export, write_csv};
use tempfile::TempDir;

fn jan_first() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 30, 0))
        .unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_two_regions_merged_and_filtered() {
    let dir = TempDir::new().unwrap();
    let vic = write_csv(
        dir.path(),
        "PRICE_AND_DEMAND_202101_VIC1.csv",
        &aemo_export("VIC1", jan_first(), Duration::minutes(30), &[40.0, 45.0, 300.0, 42.0]),
    )
    .unwrap();
    let nsw = write_csv(
        dir.path(),
        "PRICE_AND_DEMAND_202101_NSW1.csv",
        &aemo_export("NSW1", jan_first(), Duration::minutes(30), &[60.0, 65.0, 70.0, 75.0]),
    )
    .unwrap();

    let options = LoadOptions::new(ColumnOverrides::new(), Some("Australia/Brisbane")).unwrap();
    let table = load_csvs(&[vic, nsw], &options, true).unwrap();
    assert_eq!(table.len(), 8);
    assert!(table.has_demand());

    // Sorted by timestamp, stable: VIC1 rows precede NSW1 rows at equal times
    let regions: Vec<&str> = table.records().iter().take(2).map(|r| r.region.as_str()).collect();
    assert_eq!(regions, vec!["VIC1", "NSW1"]);

    let vic_only = filter(&table, Some("vic1"), Some("2021-01-01 01:30"), None).unwrap();
    assert_eq!(vic_only.prices().collect::<Vec<_>>(), vec![300.0, 42.0]);

    let summary = summarize(&vic_only).unwrap();
    assert_eq!(summary.count, 2);
    assert!(close(summary.mean_price, 171.0));
    assert!(close(summary.max_demand.unwrap(), 5030.0));
}

#[test]
fn test_overlapping_months_deduplicated() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(
        dir.path(),
        "part1.csv",
        &aemo_export("SA1", jan_first(), Duration::hours(1), &[10.0, 20.0, 30.0]),
    )
    .unwrap();
    // Starts one hour later: the first two rows overlap with part1
    let second = write_csv(
        dir.path(),
        "part2.csv",
        &aemo_export(
            "SA1",
            jan_first() + Duration::hours(1),
            Duration::hours(1),
            &[99.0, 98.0, 40.0],
        ),
    )
    .unwrap();

    let deduped = load_csvs(&[&first, &second], &LoadOptions::default(), true).unwrap();
    assert_eq!(deduped.prices().collect::<Vec<_>>(), vec![10.0, 20.0, 30.0, 40.0]);

    let kept = load_csvs(&[&first, &second], &LoadOptions::default(), false).unwrap();
    assert_eq!(kept.len(), 6);
}

#[test]
fn test_spikes_and_backtest_on_loaded_data() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "qld.csv",
        &aemo_export("QLD1", jan_first(), Duration::hours(1), &[20.0, 100.0, 200.0, 50.0]),
    )
    .unwrap();
    let table = load_csvs(&[path], &LoadOptions::default(), true).unwrap();

    let report = detect_spikes(&table, None, Some(0.75)).unwrap();
    assert!(close(report.stats.cutoff, 125.0));
    assert_eq!(report.stats.spike_count, 1);

    let result = battery_backtest(&table, &SimulationConfig::default()).unwrap();
    assert!(result.total_profit > 0.0);
    assert!(close(result.total_profit, 160.0));
    assert_eq!(result.cycles, 1);

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["charge_events"], 1);
}

#[test]
fn test_bad_file_aborts_whole_load() {
    let dir = TempDir::new().unwrap();
    let good = write_csv(
        dir.path(),
        "good.csv",
        &aemo_export("TAS1", jan_first(), Duration::minutes(5), &[30.0, 31.0]),
    )
    .unwrap();
    let bad = write_csv(
        dir.path(),
        "bad.csv",
        "REGION,SETTLEMENTDATE,RRP\nTAS1,2021/01/01 00:40:00,not-a-price\n",
    )
    .unwrap();

    let err = load_csvs(&[good, bad], &LoadOptions::default(), true).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidColumn { ref origin, .. } if origin.ends_with("bad.csv")));
}

#[test]
fn test_five_minute_interval_inferred() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "dispatch.csv",
        &aemo_export("VIC1", jan_first(), Duration::minutes(5), &[10.0, 200.0, 10.0, 200.0]),
    )
    .unwrap();
    let table = load_csvs(&[path], &LoadOptions::default(), true).unwrap();

    let result = battery_backtest(&table, &SimulationConfig::default()).unwrap();
    assert!(close(result.interval_hours, 5.0 / 60.0));
    assert!(close(result.energy_from_grid, 2.0 * 5.0 / 60.0));
}
