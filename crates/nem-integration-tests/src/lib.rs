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

//! Fixtures for the end-to-end tests

use chrono::{Duration, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Write `contents` to `dir/name` and return the path
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// AEMO "PRICE_AND_DEMAND" style export: one row per price, `step` apart
#[must_use]
pub fn aemo_export(region: &str, start: NaiveDateTime, step: Duration, prices: &[f64]) -> String {
    let mut csv = String::from("REGION,SETTLEMENTDATE,TOTALDEMAND,RRP,PERIODTYPE\n");
    let mut timestamp = start;
    for (i, price) in prices.iter().enumerate() {
        let demand = 5000 + i * 10;
        csv.push_str(&format!(
            "{region},{},{demand}.0,{price},TRADE\n",
            timestamp.format("%Y/%m/%d %H:%M:%S")
        ));
        timestamp += step;
    }
    csv
}
