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

//! CSV file boundary. The only module in the core that touches the filesystem.

use csv::{ReaderBuilder, Trim};
use nem_types::{PriceTable, RawSource};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AnalyzerError, Result};
use crate::merge::merge_tables;
use crate::normalize::normalize;
use crate::options::LoadOptions;

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    // Headers stay verbatim so overrides can name them exactly
    builder.has_headers(true).trim(Trim::Fields).flexible(true);
    builder
}

/// Read comma-delimited text into a [`RawSource`] labelled `name`
///
/// Short rows are accepted (their trailing cells are missing); a row with
/// more fields than the header fails with [`AnalyzerError::MalformedRow`].
pub fn parse_csv<R: Read>(name: &str, reader: R) -> Result<RawSource> {
    let csv_error = |error| AnalyzerError::Csv {
        origin: name.to_owned(),
        error,
    };

    let mut reader = builder().from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() > headers.len() {
            return Err(AnalyzerError::MalformedRow {
                origin: name.to_owned(),
                // header is line 1
                line: record.position().map_or(rows.len() as u64 + 2, csv::Position::line),
                fields: record.len(),
                expected: headers.len(),
            });
        }
        rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    debug!(source = name, columns = headers.len(), rows = rows.len(), "Parsed CSV");
    Ok(RawSource::new(name, headers, rows))
}

/// Read a CSV file; the path becomes the source label
pub fn read_source(path: &Path) -> Result<RawSource> {
    if !path.exists() {
        return Err(AnalyzerError::SourceNotFound(path.to_path_buf()));
    }
    let name = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| AnalyzerError::Csv {
        origin: name.clone(),
        error: csv::Error::from(e),
    })?;
    parse_csv(&name, file)
}

/// Read and normalize a single CSV file
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<PriceTable> {
    let source = read_source(path)?;
    let table = normalize(&source, options)?;
    info!(
        source = %path.display(),
        rows = table.len(),
        demand = table.has_demand(),
        "Loaded price data"
    );
    Ok(table)
}

/// Read, normalize and merge CSV files in the given order
pub fn load_csvs<P: AsRef<Path>>(
    paths: &[P],
    options: &LoadOptions,
    drop_duplicates: bool,
) -> Result<PriceTable> {
    if paths.is_empty() {
        return Err(AnalyzerError::NoSources);
    }

    let tables = paths
        .iter()
        .map(|path| load_csv(path.as_ref(), options))
        .collect::<Result<Vec<_>>>()?;
    let concatenated: usize = tables.iter().map(PriceTable::len).sum();

    let merged = merge_tables(tables, drop_duplicates)?;
    info!(
        sources = paths.len(),
        rows = merged.len(),
        dropped = concatenated - merged.len(),
        "Merged sources"
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ColumnOverrides;
    use nem_types::Role;

    #[test]
    fn test_parse_csv_trims_and_pads() {
        let data = "timestamp,region,price\n2021-01-01 00:00, VIC1 ,50\n2021-01-01 00:05,VIC1\n";
        let source = parse_csv("inline", data.as_bytes()).unwrap();

        assert_eq!(source.headers, vec!["timestamp", "region", "price"]);
        assert_eq!(source.row_count(), 2);
        assert_eq!(source.cell(0, 1), Some("VIC1"));
        assert_eq!(source.cell(1, 2), None);
    }

    #[test]
    fn test_parse_csv_rejects_long_rows() {
        let data = "timestamp,region,price\n2021-01-01 00:00,VIC1,50\n2021-01-01 00:05,VIC1,50,999\n";
        let err = parse_csv("inline", data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            AnalyzerError::MalformedRow { ref origin, line: 3, fields: 4, expected: 3 } if origin == "inline"
        ));
        assert_eq!(err.to_string(), "inline: line 3 has 4 fields, header has 3");
    }

    #[test]
    fn test_parse_csv_keeps_headers_verbatim() {
        let data = "timestamp, RRP,region\n2021-01-01 00:00, 50 ,VIC1\n";
        let source = parse_csv("inline", data.as_bytes()).unwrap();

        assert_eq!(source.headers, vec!["timestamp", " RRP", "region"]);
        assert_eq!(source.cell(0, 1), Some("50"));

        let mut overrides = ColumnOverrides::new();
        overrides.insert(Role::Price, " RRP".to_owned());
        let options = LoadOptions::new(overrides, None).unwrap();
        let table = normalize(&source, &options).unwrap();
        assert_eq!(table.prices().collect::<Vec<_>>(), vec![50.0]);
    }

    #[test]
    fn test_parse_csv_header_only() {
        let source = parse_csv("inline", "timestamp,region,price\n".as_bytes()).unwrap();
        assert_eq!(source.row_count(), 0);

        let err = normalize(&source, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptySource { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_source(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, AnalyzerError::SourceNotFound(_)));
    }

    #[test]
    fn test_load_csvs_requires_paths() {
        let paths: [&Path; 0] = [];
        assert!(matches!(
            load_csvs(&paths, &LoadOptions::default(), true),
            Err(AnalyzerError::NoSources)
        ));
    }
}
