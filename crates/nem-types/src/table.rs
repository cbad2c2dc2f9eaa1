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

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;

/// A single normalized market interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    /// Interval timestamp; zone-naive tables carry their wall-clock in UTC
    pub timestamp: DateTime<Tz>,
    /// Region code (e.g. "VIC1")
    pub region: String,
    /// Spot price ($/MWh), may be negative
    pub price: f64,
    /// Operational demand (MW) when the source has a demand column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<f64>,
}

impl CanonicalRecord {
    /// Timestamp as wall-clock time in the owning table's zone
    #[must_use]
    pub fn wall_clock(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }
}

/// Canonical table: timestamp, region, price and an optional demand column.
///
/// `zone` is `None` for zone-naive tables. When `has_demand` is false every
/// record's `demand` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    zone: Option<Tz>,
    has_demand: bool,
    records: Vec<CanonicalRecord>,
}

impl PriceTable {
    #[must_use]
    pub fn new(zone: Option<Tz>, has_demand: bool, mut records: Vec<CanonicalRecord>) -> Self {
        if !has_demand {
            for record in &mut records {
                record.demand = None;
            }
        }
        Self {
            zone,
            has_demand,
            records,
        }
    }

    #[must_use]
    pub fn empty(zone: Option<Tz>, has_demand: bool) -> Self {
        Self::new(zone, has_demand, Vec::new())
    }

    #[must_use]
    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    #[must_use]
    pub fn has_demand(&self) -> bool {
        self.has_demand
    }

    #[must_use]
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CanonicalRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.price)
    }

    /// Demand values that are present, in row order
    pub fn demands(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(|r| r.demand)
    }

    /// Stable ascending sort by timestamp
    pub fn sort_by_timestamp(&mut self) {
        self.records.sort_by_key(|r| r.timestamp);
    }

    /// New table with the rows matching `keep`, preserving order and columns
    #[must_use]
    pub fn select(&self, mut keep: impl FnMut(&CanonicalRecord) -> bool) -> Self {
        Self {
            zone: self.zone,
            has_demand: self.has_demand,
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
