// src/storage/mod.rs

//! Storage of downloaded documents.
//!
//! Documents are kept as flat files in one download directory, named
//! deterministically from identifier and format so repeated runs can skip
//! what is already there.

pub mod local;

// Re-export for convenience
pub use local::LocalStorage;
