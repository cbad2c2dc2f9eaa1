// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of NEM Analyzer.

/// One untyped tabular source: a header row plus rows of text cells.
///
/// Rows shorter than the header are allowed; missing trailing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSource {
    /// Label used when reporting errors (usually the file path)
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSource {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Build a source from string slices, mostly useful for fixtures
    #[must_use]
    pub fn from_strs(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            name: name.to_owned(),
            headers: headers.iter().map(|h| (*h).to_owned()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
                .collect(),
        }
    }

    /// Cell at `column` in `row`, trimmed; `None` when absent or blank
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_handles_short_rows_and_blanks() {
        let source = RawSource::from_strs("mem", &["a", "b", "c"], &[&["1", "  "], &["x"]]);

        assert_eq!(source.cell(0, 0), Some("1"));
        assert_eq!(source.cell(0, 1), None);
        assert_eq!(source.cell(0, 2), None);
        assert_eq!(source.cell(1, 0), Some("x"));
        assert_eq!(source.cell(5, 0), None);
        assert_eq!(source.row_count(), 2);
    }
}
