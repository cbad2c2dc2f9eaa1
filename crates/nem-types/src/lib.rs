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

pub mod report;
pub mod role;
pub mod source;
pub mod table;

// Re-export common types for convenience
pub use report::{BacktestResult, PriceSummary, SpikeReport, SpikeStats};
pub use role::Role;
pub use source::RawSource;
pub use table::{CanonicalRecord, PriceTable};
