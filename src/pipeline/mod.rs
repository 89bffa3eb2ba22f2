// src/pipeline/mod.rs

//! Pipeline entry points for rfcutils commands.
//!
//! - `run_download`: Filter the index and download the matching RFCs
//! - `run_search`: Make sure text copies exist, then search them
//! - `run_validate`: Check configuration values

pub mod download;
pub mod search;
pub mod validate;

pub use download::{NO_MATCH_MESSAGE, run_download};
pub use search::run_search;
pub use validate::run_validate;
