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

//! Error types for the ingestion and analysis pipeline

use nem_types::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Every variant is terminal for the operation that raised it.
///
/// Source-level variants carry `origin`, the label of the source that failed,
/// so a multi-source merge reports which file broke.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{origin}: failed to read CSV: {error}")]
    Csv {
        origin: String,
        #[source]
        error: csv::Error,
    },

    #[error("{origin}: line {line} has {fields} fields, header has {expected}")]
    MalformedRow {
        origin: String,
        line: u64,
        fields: usize,
        expected: usize,
    },

    #[error("{origin}: source contains no data rows")]
    EmptySource { origin: String },

    #[error("cannot {operation} on an empty table")]
    EmptyTable { operation: &'static str },

    #[error("{origin}: missing required column for '{role}'")]
    MissingColumn { origin: String, role: Role },

    #[error("{origin}: override for '{role}' not found in headers: {header}")]
    InvalidOverride {
        origin: String,
        role: Role,
        header: String,
    },

    #[error("{origin}: {role} column contains invalid or missing values")]
    InvalidColumn { origin: String, role: Role },

    #[error("no sources provided")]
    NoSources,

    #[error("cannot merge tables in different timezones: {expected} and {found}")]
    MixedTimezones { expected: String, found: String },

    #[error("provide either a spike threshold or a quantile")]
    MissingCriterion,

    #[error("quantile must be between 0 and 1, got {0}")]
    InvalidQuantile(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("invalid datetime bound: {0}")]
    InvalidBound(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
