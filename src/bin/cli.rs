// src/bin/cli.rs

//! rfcutils CLI
//!
//! Download RFCs selected from the RFC Editor index and search the local
//! plain-text copies.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rfcutils::{
    error::Result,
    models::{Config, DownloadOptions, Format, IdentifierSelection, Status},
    pipeline,
    services::{Downloader, IndexFetcher, Searcher},
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// Fallback when the terminal size cannot be read.
const DEFAULT_WIDTH: usize = 80;

/// rfcutils - RFC downloader and local search
#[derive(Parser, Debug)]
#[command(name = "rfcutils", version, about = "Download and search RFCs")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "rfcutils.toml", global = true)]
    config: PathBuf,

    /// Download directory (overrides config and RFCDOWNLOADER_FOLDER)
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download RFCs matching the given filters
    Download {
        /// RFC numbers to get, or "all"
        #[arg(long = "rfc_numbers", num_args = 1.., default_value = "all")]
        rfc_numbers: Vec<String>,

        /// Keep RFCs whose title or abstract contains any of these words
        #[arg(long = "desc_contain", num_args = 1..)]
        desc_contain: Vec<String>,

        /// Keep RFCs in any of these statuses
        #[arg(long, num_args = 1.., value_parser = parse_status)]
        statuses: Vec<Status>,

        /// Formats to retrieve, tried in order
        #[arg(
            long,
            num_args = 1..,
            value_parser = parse_format,
            default_values = ["TXT", "PDF", "HTML"]
        )]
        filetypes: Vec<Format>,

        /// Download again the filtered RFC list
        #[arg(long = "download-again")]
        download_again: bool,
    },

    /// Search downloaded RFC texts for keywords
    Search {
        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Keywords to look for (any of them matches)
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Validate configuration
    Validate,
}

fn parse_status(value: &str) -> std::result::Result<Status, String> {
    value.parse().map_err(|e: rfcutils::error::AppError| e.to_string())
}

fn parse_format(value: &str) -> std::result::Result<Format, String> {
    value.parse().map_err(|e: rfcutils::error::AppError| e.to_string())
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Current terminal width in columns.
fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _rows)| usize::from(columns))
        .ok()
        .filter(|&columns| columns > 0)
        .or_else(|| std::env::var("COLUMNS").ok()?.parse().ok())
        .unwrap_or(DEFAULT_WIDTH)
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let download_dir = cli.download_dir.unwrap_or_else(|| config.download_dir());

    let fetcher = HttpFetcher::new(&config.http)?;
    let storage = LocalStorage::new(download_dir);

    match cli.command {
        Command::Download {
            rfc_numbers,
            desc_contain,
            statuses,
            filetypes,
            download_again,
        } => {
            config.validate()?;
            let index = IndexFetcher::new(&fetcher, config.index_url()?);
            let downloader = Downloader::new(&fetcher, &storage, config.site_url()?);

            let options = DownloadOptions {
                identifiers: IdentifierSelection::from_values(&rfc_numbers),
                text_contains: desc_contain,
                statuses,
                formats: filetypes,
                force_refresh: download_again,
            };
            pipeline::run_download(&index, &downloader, &options)?;
        }

        Command::Search { json, keywords } => {
            config.validate()?;
            let index = IndexFetcher::new(&fetcher, config.index_url()?);
            let downloader = Downloader::new(&fetcher, &storage, config.site_url()?);

            let searcher = Searcher::new(&index, &downloader);
            pipeline::run_search(&searcher, &keywords, terminal_width(), json)?;
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("Download directory in use: {}", storage.root().display());
        }
    }

    Ok(())
}
