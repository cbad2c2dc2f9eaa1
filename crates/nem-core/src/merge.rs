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

//! Combining several sources into one table

use chrono::DateTime;
use chrono_tz::Tz;
use nem_types::{PriceTable, RawSource};
use std::collections::HashSet;

use crate::error::{AnalyzerError, Result};
use crate::normalize::normalize;
use crate::options::LoadOptions;

/// Normalize every source, then merge.
///
/// The first source that fails aborts the merge; its error names the source.
pub fn merge_sources(
    sources: &[RawSource],
    options: &LoadOptions,
    drop_duplicates: bool,
) -> Result<PriceTable> {
    if sources.is_empty() {
        return Err(AnalyzerError::NoSources);
    }
    let tables = sources
        .iter()
        .map(|source| normalize(source, options))
        .collect::<Result<Vec<_>>>()?;
    merge_tables(tables, drop_duplicates)
}

fn zone_label(zone: Option<Tz>) -> String {
    zone.map_or_else(|| "zone-naive".to_owned(), |tz| tz.name().to_owned())
}

/// Concatenate already-normalized tables in input order.
///
/// All tables must share one zone (or all be zone-naive). With
/// `drop_duplicates`, the first row seen for each (timestamp, region)
/// pair wins. The result is re-sorted by timestamp (stable), and carries a
/// demand column if any input did.
pub fn merge_tables(tables: Vec<PriceTable>, drop_duplicates: bool) -> Result<PriceTable> {
    let Some(zone) = tables.first().map(PriceTable::zone) else {
        return Err(AnalyzerError::NoSources);
    };
    if let Some(other) = tables.iter().map(PriceTable::zone).find(|z| *z != zone) {
        return Err(AnalyzerError::MixedTimezones {
            expected: zone_label(zone),
            found: zone_label(other),
        });
    }
    let has_demand = tables.iter().any(PriceTable::has_demand);

    let mut records: Vec<_> = tables.into_iter().flat_map(PriceTable::into_records).collect();
    if drop_duplicates {
        let mut seen: HashSet<(DateTime<Tz>, String)> = HashSet::with_capacity(records.len());
        records.retain(|r| seen.insert((r.timestamp, r.region.clone())));
    }

    let mut merged = PriceTable::new(zone, has_demand, records);
    merged.sort_by_timestamp();
    Ok(merged)
}
