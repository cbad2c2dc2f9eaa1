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

//! Raw source -> canonical table

use nem_types::{CanonicalRecord, PriceTable, RawSource, Role};

use crate::error::{AnalyzerError, Result};
use crate::options::LoadOptions;
use crate::resolver::ColumnResolver;
use crate::timestamp;

/// Numeric cell; blank, non-numeric and NaN cells are missing
fn parse_number(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|c| c.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

/// Column indexes for [`Role::REQUIRED`]; the first unresolved role fails
fn required_columns(resolver: &ColumnResolver<'_>) -> Result<[usize; 3]> {
    let mut columns = [0; 3];
    for (slot, role) in columns.iter_mut().zip(Role::REQUIRED) {
        *slot = resolver.require(role)?.index;
    }
    Ok(columns)
}

/// Normalize one source into a canonical table sorted by timestamp.
///
/// Required roles are timestamp, region and price; demand is carried only
/// when the source has a column for it. Any required cell that is missing or
/// fails to parse rejects the whole source.
pub fn normalize(source: &RawSource, options: &LoadOptions) -> Result<PriceTable> {
    let origin = source.name.as_str();
    if source.row_count() == 0 {
        return Err(AnalyzerError::EmptySource {
            origin: origin.to_owned(),
        });
    }

    let resolver = ColumnResolver::new(origin, &source.headers, options.column_overrides());
    let [ts_col, region_col, price_col] = required_columns(&resolver)?;
    let demand_col = resolver.resolve(Role::Demand)?.map(|c| c.index);

    let invalid = |role| AnalyzerError::InvalidColumn {
        origin: origin.to_owned(),
        role,
    };
    let rows = 0..source.row_count();
    let zone = options.timezone();

    let timestamps = rows
        .clone()
        .map(|row| source.cell(row, ts_col).and_then(|c| timestamp::coerce(c, zone)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid(Role::Timestamp))?;
    let prices = rows
        .clone()
        .map(|row| parse_number(source.cell(row, price_col)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid(Role::Price))?;
    let regions = rows
        .clone()
        .map(|row| source.cell(row, region_col).map(str::to_owned))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid(Role::Region))?;

    let records = timestamps
        .into_iter()
        .zip(regions)
        .zip(prices)
        .zip(rows)
        .map(|(((timestamp, region), price), row)| CanonicalRecord {
            timestamp,
            region,
            price,
            demand: demand_col.and_then(|col| parse_number(source.cell(row, col))),
        })
        .collect();

    let mut table = PriceTable::new(zone, demand_col.is_some(), records);
    table.sort_by_timestamp();
    Ok(table)
}
