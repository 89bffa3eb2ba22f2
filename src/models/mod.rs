// src/models/mod.rs

//! Domain models for rfcutils.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod entry;
mod filter;

// Re-export all public types
pub use catalog::{Catalog, RFC_INDEX_NAMESPACE};
pub use config::{Config, DOWNLOAD_DIR_ENV, HttpConfig, IndexConfig, StorageConfig};
pub use entry::{Format, IDENTIFIER_WIDTH, IndexEntry, Status, normalize_identifier};
pub use filter::{DownloadOptions, Filters, IdentifierSelection};
