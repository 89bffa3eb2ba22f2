// src/pipeline/download.rs

//! Download pipeline.

use crate::error::Result;
use crate::models::DownloadOptions;
use crate::services::{DownloadReport, Downloader, IndexFetcher};

/// Printed when filtering leaves no RFC to download.
pub const NO_MATCH_MESSAGE: &str = "No RFC found with the current filterings.";

/// Filter the index with `options` and download what survives.
///
/// An empty selection is reported on stdout and is not an error.
pub fn run_download(
    index: &IndexFetcher<'_>,
    downloader: &Downloader<'_>,
    options: &DownloadOptions,
) -> Result<DownloadReport> {
    options.validate()?;

    let catalog = index.catalog()?;
    let selected = options.filters().apply(catalog);
    log::info!(
        "{} of {} RFCs match the current filters",
        selected.len(),
        catalog.len()
    );

    if selected.is_empty() {
        println!("{NO_MATCH_MESSAGE}");
        return Ok(DownloadReport::default());
    }

    downloader.download(&selected, &options.formats, options.force_refresh)
}
