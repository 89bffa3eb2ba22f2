// src/services/downloader.rs

//! Download executor.
//!
//! Fetches each selected entry in the first requested format that is either
//! already on disk or available remotely.

use url::Url;

use crate::error::Result;
use crate::models::{Format, IndexEntry};
use crate::storage::LocalStorage;
use crate::utils::http::Fetch;

/// Summary of one download pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Entries that survived filtering
    pub selected: usize,
    /// Entries fetched during this pass
    pub downloaded: usize,
    /// Entries already present locally
    pub skipped: usize,
    /// Entries for which no requested format could be fetched
    pub missing: usize,
    /// Network requests issued
    pub fetch_attempts: usize,
}

impl DownloadReport {
    /// True when filtering left nothing to do.
    pub fn is_empty(&self) -> bool {
        self.selected == 0
    }
}

/// What happened to one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOutcome {
    Downloaded(Format),
    AlreadyPresent(Format),
    Missing,
}

/// Service writing selected documents into local storage.
pub struct Downloader<'a> {
    fetcher: &'a dyn Fetch,
    storage: &'a LocalStorage,
    site: Url,
}

impl<'a> Downloader<'a> {
    pub fn new(fetcher: &'a dyn Fetch, storage: &'a LocalStorage, site: Url) -> Self {
        Self {
            fetcher,
            storage,
            site,
        }
    }

    pub fn storage(&self) -> &LocalStorage {
        self.storage
    }

    /// Download `entries` in the first workable format among `formats`.
    ///
    /// Unless `force_refresh` is set, a non-empty local copy in any
    /// requested format satisfies the entry without a network call. Only
    /// local I/O failures abort the pass.
    pub fn download(
        &self,
        entries: &[&IndexEntry],
        formats: &[Format],
        force_refresh: bool,
    ) -> Result<DownloadReport> {
        let mut report = DownloadReport {
            selected: entries.len(),
            ..DownloadReport::default()
        };

        if entries.is_empty() {
            log::info!("No matching entries, nothing to download");
            return Ok(report);
        }

        self.storage.ensure_root()?;
        log::info!(
            "Processing {} RFCs into {}",
            entries.len(),
            self.storage.root().display()
        );

        for entry in entries {
            match self.download_entry(entry, formats, force_refresh, &mut report)? {
                EntryOutcome::Downloaded(format) => {
                    log::info!("Downloaded RFC {} ({})", entry.identifier, format);
                    report.downloaded += 1;
                }
                EntryOutcome::AlreadyPresent(format) => {
                    log::debug!("RFC {} already present ({})", entry.identifier, format);
                    report.skipped += 1;
                }
                EntryOutcome::Missing => {
                    log::debug!("RFC {} unavailable in any requested format", entry.identifier);
                    report.missing += 1;
                }
            }
        }

        log::info!(
            "Download pass done: {} downloaded, {} already present, {} unavailable",
            report.downloaded,
            report.skipped,
            report.missing
        );
        Ok(report)
    }

    fn download_entry(
        &self,
        entry: &IndexEntry,
        formats: &[Format],
        force_refresh: bool,
        report: &mut DownloadReport,
    ) -> Result<EntryOutcome> {
        for &format in formats {
            if !force_refresh && self.storage.is_present(&entry.identifier, format) {
                return Ok(EntryOutcome::AlreadyPresent(format));
            }

            let url = entry.location(&self.site, format)?;
            report.fetch_attempts += 1;
            match self.fetcher.fetch(url.as_str()) {
                Ok(bytes) => {
                    self.storage.write(&entry.identifier, format, &bytes)?;
                    return Ok(EntryOutcome::Downloaded(format));
                }
                // The index under-reports formats; a 404 just means "try the next one".
                Err(e) if e.is_not_found() => {
                    log::debug!("{} not available: {}", entry.identifier, url);
                }
                Err(e) => {
                    log::warn!("Failed to fetch {}: {}", url, e);
                }
            }
        }
        Ok(EntryOutcome::Missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, DownloadOptions, Status};
    use crate::utils::http::fake::MemoryFetcher;
    use std::fs;
    use tempfile::TempDir;

    const SITE: &str = "https://www.ietf.org/rfc/";

    fn site() -> Url {
        Url::parse(SITE).unwrap()
    }

    fn entry(id: &str, status: &str, formats: &[&str]) -> IndexEntry {
        IndexEntry {
            identifier: id.to_string(),
            title: format!("RFC {id}"),
            abstract_text: String::new(),
            status: status.to_string(),
            formats: formats.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::from_entries(vec![
            entry("0001", "INFORMATIONAL", &["TEXT"]),
            entry("0002", "INFORMATIONAL", &["TEXT", "PDF"]),
            entry("0003", "INFORMATIONAL", &["TEXT"]),
        ])
        .unwrap()
    }

    fn url(id: &str, ext: &str) -> String {
        format!("{SITE}rfc{id}.{ext}")
    }

    #[test]
    fn test_status_filter_then_one_fetch_per_entry() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("rfc"));
        let fetcher = MemoryFetcher::default()
            .with(&url("0001", "txt"), "one")
            .with(&url("0002", "txt"), "two")
            .with(&url("0003", "txt"), "three");
        let catalog = sample_catalog();

        let options = DownloadOptions {
            statuses: vec![Status::Informational],
            formats: vec![Format::Txt],
            ..DownloadOptions::default()
        };
        let selected = options.filters().apply(&catalog);
        let downloader = Downloader::new(&fetcher, &storage, site());
        let report = downloader
            .download(&selected, &options.formats, false)
            .unwrap();

        assert_eq!(fetcher.request_count(), 3);
        assert_eq!(report.downloaded, 3);
        assert_eq!(
            fs::read_to_string(storage.path("0002", Format::Txt)).unwrap(),
            "two"
        );
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = MemoryFetcher::default()
            .with(&url("0001", "txt"), "one")
            .with(&url("0002", "txt"), "two")
            .with(&url("0003", "txt"), "three");
        let catalog = sample_catalog();
        let selected: Vec<_> = catalog.iter().collect();
        let downloader = Downloader::new(&fetcher, &storage, site());

        downloader.download(&selected, &[Format::Txt], false).unwrap();
        let first = fetcher.request_count();

        let report = downloader.download(&selected, &[Format::Txt], false).unwrap();
        assert_eq!(fetcher.request_count(), first);
        assert_eq!(report.fetch_attempts, 0);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_force_refresh_refetches() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = MemoryFetcher::default().with(&url("0001", "txt"), "fresh");
        storage.write("0001", Format::Txt, b"stale").unwrap();

        let catalog = sample_catalog();
        let selected = vec![catalog.get("0001").unwrap()];
        let downloader = Downloader::new(&fetcher, &storage, site());

        let report = downloader.download(&selected, &[Format::Txt], true).unwrap();
        assert_eq!(fetcher.request_count(), 1);
        assert_eq!(report.downloaded, 1);
        assert_eq!(
            fs::read_to_string(storage.path("0001", Format::Txt)).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_missing_format_falls_through_to_next() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = MemoryFetcher::default().with(&url("0002", "pdf"), "%PDF");
        let catalog = sample_catalog();
        let selected = vec![catalog.get("0002").unwrap()];
        let downloader = Downloader::new(&fetcher, &storage, site());

        let report = downloader
            .download(&selected, &[Format::Txt, Format::Pdf, Format::Html], false)
            .unwrap();

        assert_eq!(
            fetcher.requests(),
            vec![url("0002", "txt"), url("0002", "pdf")]
        );
        assert_eq!(report.downloaded, 1);
        assert!(storage.is_present("0002", Format::Pdf));
        assert!(!storage.is_present("0002", Format::Html));
    }

    #[test]
    fn test_first_present_format_stops_the_entry() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.write("0001", Format::Txt, b"have it").unwrap();
        let fetcher = MemoryFetcher::default().with(&url("0001", "pdf"), "%PDF");
        let catalog = sample_catalog();
        let selected = vec![catalog.get("0001").unwrap()];
        let downloader = Downloader::new(&fetcher, &storage, site());

        let report = downloader
            .download(&selected, &[Format::Txt, Format::Pdf], false)
            .unwrap();

        assert_eq!(fetcher.request_count(), 0);
        assert_eq!(report.skipped, 1);
        assert!(!storage.is_present("0001", Format::Pdf));
    }

    #[test]
    fn test_unavailable_entry_is_counted_missing() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let fetcher = MemoryFetcher::default();
        let catalog = sample_catalog();
        let selected = vec![catalog.get("0003").unwrap()];
        let downloader = Downloader::new(&fetcher, &storage, site());

        let report = downloader
            .download(&selected, &[Format::Txt, Format::Html], false)
            .unwrap();
        assert_eq!(report.missing, 1);
        assert_eq!(report.fetch_attempts, 2);
    }

    #[test]
    fn test_empty_selection_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("rfc");
        let storage = LocalStorage::new(&root);
        let fetcher = MemoryFetcher::default();
        let downloader = Downloader::new(&fetcher, &storage, site());

        let report = downloader.download(&[], &[Format::Txt], false).unwrap();
        assert!(report.is_empty());
        assert!(!root.exists());
        assert_eq!(fetcher.request_count(), 0);
    }
}
