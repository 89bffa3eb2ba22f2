// src/models/filter.rs

//! Entry selection: download options and the filter chain they produce.

use std::collections::BTreeSet;

use crate::error::{AppError, Result};
use crate::models::catalog::Catalog;
use crate::models::entry::{Format, IndexEntry, Status, normalize_identifier};

/// Which identifiers to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentifierSelection {
    /// Every identifier in the catalog.
    #[default]
    All,
    /// Only these normalized identifiers.
    Only(BTreeSet<String>),
}

impl IdentifierSelection {
    /// Build from user-supplied values; any `all` selects everything.
    pub fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        if values.is_empty()
            || values
                .iter()
                .any(|v| v.as_ref().trim().eq_ignore_ascii_case("all"))
        {
            return Self::All;
        }
        Self::Only(
            values
                .iter()
                .map(|v| normalize_identifier(v.as_ref()))
                .collect(),
        )
    }

    fn keeps(&self, identifier: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(identifier),
        }
    }
}

/// Predicates narrowing the catalog.
///
/// Empty lists are no-ops. Supplied filters are ANDed, values inside one
/// filter are ORed.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub identifiers: IdentifierSelection,
    pub text_contains: Vec<String>,
    pub statuses: Vec<Status>,
    pub formats: Vec<Format>,
}

impl Filters {
    /// Apply every supplied filter, cheapest first.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a IndexEntry> {
        let mut subset: Vec<&IndexEntry> = match &self.identifiers {
            IdentifierSelection::All => catalog.iter().collect(),
            selection => catalog
                .iter()
                .filter(|e| selection.keeps(&e.identifier))
                .collect(),
        };

        if !self.statuses.is_empty() {
            subset.retain(|e| self.statuses.iter().any(|s| s.matches(&e.status)));
        }

        // The index under-reports formats, so this only narrows on what it declares.
        if !self.formats.is_empty() {
            subset.retain(|e| self.formats.iter().any(|f| e.declares(*f)));
        }

        if !self.text_contains.is_empty() {
            subset.retain(|e| self.text_contains.iter().any(|w| e.describes(w)));
        }

        subset
    }
}

/// Options of one download run, validated before any work starts.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub identifiers: IdentifierSelection,
    pub text_contains: Vec<String>,
    pub statuses: Vec<Status>,
    /// Formats to try per entry, in order
    pub formats: Vec<Format>,
    /// Re-fetch even when a non-empty local copy exists
    pub force_refresh: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            identifiers: IdentifierSelection::All,
            text_contains: Vec::new(),
            statuses: Vec::new(),
            formats: Format::DEFAULTS.to_vec(),
            force_refresh: false,
        }
    }
}

impl DownloadOptions {
    /// Options for the plain-text pass that precedes a search.
    pub fn text_only() -> Self {
        Self {
            formats: vec![Format::Txt],
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.formats.is_empty() {
            return Err(AppError::validation("at least one file type is required"));
        }
        if let IdentifierSelection::Only(ids) = &self.identifiers {
            if let Some(bad) = ids.iter().find(|id| !id.bytes().all(|b| b.is_ascii_digit())) {
                return Err(AppError::validation(format!(
                    "RFC number '{bad}' is not numeric"
                )));
            }
        }
        if self.text_contains.iter().any(|w| w.is_empty()) {
            return Err(AppError::validation("description words must not be empty"));
        }
        Ok(())
    }

    /// Filter chain for these options.
    pub fn filters(&self) -> Filters {
        Filters {
            identifiers: self.identifiers.clone(),
            text_contains: self.text_contains.clone(),
            statuses: self.statuses.clone(),
            formats: self.formats.clone(),
        }
    }
}
