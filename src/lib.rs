// src/lib.rs

//! rfcutils: RFC index filtering, downloading and local full-text search.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
