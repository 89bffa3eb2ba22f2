// src/services/mod.rs

//! Business logic services.
//!
//! This module contains the core services that implement the main
//! functionality of the application:
//!
//! - `IndexFetcher`: Fetches and memoizes the RFC catalog
//! - `Downloader`: Writes selected RFCs into the download directory
//! - `Searcher`: Full-text search over the local plain-text copies

pub mod downloader;
pub mod index;
pub mod searcher;

pub use downloader::{DownloadReport, Downloader};
pub use index::IndexFetcher;
pub use searcher::{LISTING_PREFIX_WIDTH, SearchOutcome, Searcher};
