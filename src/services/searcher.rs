// src/services/searcher.rs

//! Full-text search over local plain-text copies.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{DownloadOptions, Format, IndexEntry};
use crate::services::downloader::{DownloadReport, Downloader};
use crate::services::index::IndexFetcher;
use crate::storage::LocalStorage;
use crate::utils::snippet;

/// Columns taken by the `[NNNN]:\t` prefix of a listing line.
pub const LISTING_PREFIX_WIDTH: usize = 8;

/// Matches of one search, ordered by identifier.
#[derive(Debug, Default)]
pub struct SearchOutcome<'c> {
    pub matches: BTreeMap<String, &'c IndexEntry>,
    /// Report of the plain-text pass that preceded the scan
    pub download: DownloadReport,
}

impl<'c> SearchOutcome<'c> {
    /// Matching identifiers, ascending.
    pub fn identifiers(&self) -> Vec<&str> {
        self.matches.keys().map(String::as_str).collect()
    }

    pub fn entries(&self) -> Vec<&'c IndexEntry> {
        self.matches.values().copied().collect()
    }

    /// One `[id]:\t<abstract snippet>` line per match for a terminal `width`.
    pub fn listing(&self, width: usize) -> Vec<String> {
        let max_length = width.saturating_sub(LISTING_PREFIX_WIDTH);
        self.matches
            .iter()
            .map(|(id, entry)| {
                format!("[{}]:\t{}", id, snippet(&entry.abstract_text, max_length))
            })
            .collect()
    }
}

/// Service that guarantees a local text corpus, then scans it.
pub struct Searcher<'a> {
    index: &'a IndexFetcher<'a>,
    downloader: &'a Downloader<'a>,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a IndexFetcher<'a>, downloader: &'a Downloader<'a>) -> Self {
        Self { index, downloader }
    }

    /// Files whose text contains ANY of `keywords` (case-sensitive).
    pub fn search(&self, keywords: &[String]) -> Result<SearchOutcome<'a>> {
        let catalog = self.index.catalog()?;

        let options = DownloadOptions::text_only();
        let selected = options.filters().apply(catalog);
        let download = self
            .downloader
            .download(&selected, &options.formats, options.force_refresh)?;

        let storage = self.downloader.storage();
        let files = storage.files(Format::Txt)?;
        log::info!("Scanning {} text files", files.len());

        let mut matches = BTreeMap::new();
        for path in files {
            let Some(identifier) = LocalStorage::identifier_of(&path) else {
                log::debug!("Skipping unrecognised file {}", path.display());
                continue;
            };
            let text = LocalStorage::read_text(&path)?;
            if !keywords.iter().any(|k| text.contains(k.as_str())) {
                continue;
            }
            match catalog.get(identifier) {
                Some(entry) => {
                    matches.insert(identifier.to_string(), entry);
                }
                None => log::warn!(
                    "{} matches but RFC {} is not in the index",
                    path.display(),
                    identifier
                ),
            }
        }

        log::info!("{} RFCs match", matches.len());
        Ok(SearchOutcome { matches, download })
    }
}
