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

//! Mapping of source headers onto canonical roles.

use nem_types::Role;

use crate::error::{AnalyzerError, Result};
use crate::options::ColumnOverrides;

/// A source column matched to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn<'a> {
    /// Position of the column in the source header row
    pub index: usize,
    /// Header exactly as it appears in the source
    pub header: &'a str,
}

/// Resolves roles against one source's header row.
///
/// Preference order:
/// 1. Explicit override; it must name a header verbatim.
/// 2. The role's alias list, in priority order, matched case-insensitively.
/// 3. Not found.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    origin: &'a str,
    headers: &'a [String],
    overrides: &'a ColumnOverrides,
}

impl<'a> ColumnResolver<'a> {
    #[must_use]
    pub fn new(origin: &'a str, headers: &'a [String], overrides: &'a ColumnOverrides) -> Self {
        Self {
            origin,
            headers,
            overrides,
        }
    }

    /// Find the column for `role`, `Ok(None)` when nothing matches
    pub fn resolve(&self, role: Role) -> Result<Option<ResolvedColumn<'a>>> {
        if let Some(header) = self.overrides.get(&role) {
            return self
                .position(|h| h == header.as_str())
                .map(Some)
                .ok_or_else(|| AnalyzerError::InvalidOverride {
                    origin: self.origin.to_owned(),
                    role,
                    header: header.clone(),
                });
        }

        Ok(role
            .aliases()
            .iter()
            .find_map(|alias| self.position(|h| h.eq_ignore_ascii_case(alias))))
    }

    /// Like [`resolve`](Self::resolve) but a missing column is an error
    pub fn require(&self, role: Role) -> Result<ResolvedColumn<'a>> {
        self.resolve(role)?
            .ok_or_else(|| AnalyzerError::MissingColumn {
                origin: self.origin.to_owned(),
                role,
            })
    }

    fn position(&self, mut matches: impl FnMut(&str) -> bool) -> Option<ResolvedColumn<'a>> {
        self.headers
            .iter()
            .enumerate()
            .find(|(_, header)| matches(header.as_str()))
            .map(|(index, header)| ResolvedColumn {
                index,
                header: header.as_str(),
            })
    }
}
