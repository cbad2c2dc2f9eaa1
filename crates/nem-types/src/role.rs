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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic field a source column can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Timestamp,
    Region,
    Price,
    Demand,
}

impl Role {
    /// Roles every normalized table must carry, in resolution order
    pub const REQUIRED: [Self; 3] = [Self::Timestamp, Self::Region, Self::Price];

    pub const ALL: [Self; 4] = [Self::Timestamp, Self::Region, Self::Price, Self::Demand];

    /// Canonical column name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Region => "region",
            Self::Price => "price",
            Self::Demand => "demand",
        }
    }

    /// Known source headers for this role, highest priority first.
    ///
    /// Matching against source headers is case-insensitive, so AEMO exports
    /// (`SETTLEMENTDATE`, `REGIONID`, `RRP`, `TOTALDEMAND`) resolve without overrides.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Timestamp => &["timestamp", "datetime", "settlementdate", "trading_interval"],
            Self::Region => &["region", "regionid"],
            Self::Price => &["price", "rrp"],
            Self::Demand => &["demand", "totaldemand", "total_demand", "demandmw"],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown column role '{s}'"))
    }
}
