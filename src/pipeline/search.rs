// src/pipeline/search.rs

//! Search pipeline.

use crate::error::Result;
use crate::services::Searcher;

/// Search local text copies for `keywords` and print the results.
///
/// Prints one listing line per match, fitted to `width` columns, or a JSON
/// array of the matching entries when `json` is set. Returns the matching
/// identifiers in ascending order.
pub fn run_search(
    searcher: &Searcher<'_>,
    keywords: &[String],
    width: usize,
    json: bool,
) -> Result<Vec<String>> {
    let outcome = searcher.search(keywords)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.entries())?);
    } else {
        for line in outcome.listing(width) {
            println!("{line}");
        }
    }

    Ok(outcome
        .identifiers()
        .into_iter()
        .map(str::to_string)
        .collect())
}
