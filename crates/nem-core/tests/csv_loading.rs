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

//! CSV loading against real files on disk

use nem_core::{AnalyzerError, ColumnOverrides, LoadOptions, Role, load_csv, load_csvs};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_rrp_header_resolves_to_price() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "dispatch.csv",
        "SETTLEMENTDATE,REGIONID,RRP,TOTALDEMAND\n\
         2021/01/01 00:05:00,VIC1,45.10,5012.3\n\
         2021/01/01 00:10:00,VIC1,47.90,5020.1\n",
    );

    let table = load_csv(&path, &LoadOptions::default()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.prices().collect::<Vec<_>>(), vec![45.10, 47.90]);
    assert_eq!(table.demands().collect::<Vec<_>>(), vec![5012.3, 5020.1]);
}

#[test]
fn test_overrides_pick_columns() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "custom.csv",
        "interval_end,market_zone,price,spot\n\
         2021-01-01T00:30:00+10:00,QLD1,1.0,88.5\n",
    );

    let mut overrides = ColumnOverrides::new();
    overrides.insert(Role::Timestamp, "interval_end".to_owned());
    overrides.insert(Role::Region, "market_zone".to_owned());
    overrides.insert(Role::Price, "spot".to_owned());
    let options = LoadOptions::new(overrides, Some("Australia/Brisbane")).unwrap();

    let table = load_csv(&path, &options).unwrap();
    let record = &table.records()[0];
    assert_eq!(record.price, 88.5);
    assert_eq!(record.region, "QLD1");
    assert_eq!(record.wall_clock().to_string(), "2021-01-01 00:30:00");
}

#[test]
fn test_missing_column_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "no_price.csv", "timestamp,region\n2021-01-01,VIC1\n");

    let err = load_csv(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, AnalyzerError::MissingColumn { role: Role::Price, .. }));
    assert!(err.to_string().contains("no_price.csv"));
}

#[test]
fn test_invalid_timestamp_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "bad_time.csv",
        "timestamp,region,price\n2021-01-01 00:00,VIC1,10\nsoon,VIC1,12\n",
    );

    let err = load_csv(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidColumn { role: Role::Timestamp, .. }));
}

#[test]
fn test_concatenate_and_dedupe_files() {
    let dir = TempDir::new().unwrap();
    let first = write(
        dir.path(),
        "part1.csv",
        "timestamp,region,price\n2021-01-01 00:00,VIC1,50\n2021-01-01 00:05,VIC1,60\n",
    );
    let second = write(
        dir.path(),
        "part2.csv",
        "timestamp,region,price\n2021-01-01 00:05,VIC1,65\n2021-01-01 00:10,VIC1,80\n",
    );

    let table = load_csvs(&[&first, &second], &LoadOptions::default(), true).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.prices().collect::<Vec<_>>(), vec![50.0, 60.0, 80.0]);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let present = write(dir.path(), "ok.csv", "timestamp,region,price\n2021-01-01,VIC1,1\n");
    let missing = dir.path().join("missing.csv");

    let err = load_csvs(&[present, missing.clone()], &LoadOptions::default(), true).unwrap_err();
    assert!(matches!(err, AnalyzerError::SourceNotFound(path) if path == missing));
}
