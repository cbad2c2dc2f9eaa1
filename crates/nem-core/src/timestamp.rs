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

//! Timestamp parsing and timezone alignment

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Formats carrying an explicit UTC offset
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    // Hours-only offsets such as `+10`
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

/// Wall-clock formats without zone information
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    // AEMO dispatch exports
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A parsed cell, before any zone rules are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedStamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

/// Parse a timestamp cell, `None` when no supported encoding matches
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<ParsedStamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let zulu;
    let offset_text = match raw.strip_suffix(['Z', 'z']) {
        Some(stripped) => {
            zulu = format!("{stripped}+00:00");
            zulu.as_str()
        }
        None => raw,
    };
    if let Some(zoned) = ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(offset_text, fmt).ok())
    {
        return Some(ParsedStamp::Zoned(zoned));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ParsedStamp::Naive(naive));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(ParsedStamp::Naive)
}

/// Apply the zone rules to a parsed value.
///
/// With a target zone, naive values are localized and zoned values converted;
/// a wall-clock that is skipped or repeated by a DST change yields `None`.
/// Without a zone the value keeps its own wall-clock, stored as UTC.
#[must_use]
pub fn align(stamp: ParsedStamp, zone: Option<Tz>) -> Option<DateTime<Tz>> {
    match (stamp, zone) {
        (ParsedStamp::Naive(naive), Some(tz)) => tz.from_local_datetime(&naive).single(),
        (ParsedStamp::Zoned(zoned), Some(tz)) => Some(zoned.with_timezone(&tz)),
        (ParsedStamp::Naive(naive), None) => Some(Tz::UTC.from_utc_datetime(&naive)),
        (ParsedStamp::Zoned(zoned), None) => Some(Tz::UTC.from_utc_datetime(&zoned.naive_local())),
    }
}

/// Parse and align in one step
#[must_use]
pub fn coerce(raw: &str, zone: Option<Tz>) -> Option<DateTime<Tz>> {
    parse_timestamp(raw).and_then(|stamp| align(stamp, zone))
}
