// src/services/index.rs

//! Index fetcher service.
//!
//! Downloads `rfc-index.xml` once and keeps the parsed catalog for the rest
//! of the run.

use std::cell::OnceCell;

use url::Url;

use crate::error::Result;
use crate::models::Catalog;
use crate::utils::http::Fetch;

/// Lazily fetched, memoized catalog.
pub struct IndexFetcher<'a> {
    fetcher: &'a dyn Fetch,
    index_url: Url,
    catalog: OnceCell<Catalog>,
}

impl<'a> IndexFetcher<'a> {
    pub fn new(fetcher: &'a dyn Fetch, index_url: Url) -> Self {
        Self {
            fetcher,
            index_url,
            catalog: OnceCell::new(),
        }
    }

    /// The catalog, fetched and parsed on first use.
    ///
    /// Network and parse failures are returned as-is; nothing is cached
    /// on failure.
    pub fn catalog(&self) -> Result<&Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        log::info!("Fetching RFC index from {}", self.index_url);
        let bytes = self.fetcher.fetch(self.index_url.as_str())?;
        let catalog = Catalog::parse(&bytes)?;
        log::info!("Loaded {} RFC entries", catalog.len());

        Ok(self.catalog.get_or_init(|| catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::utils::http::fake::MemoryFetcher;

    const INDEX_URL: &str = "https://www.ietf.org/rfc/rfc-index.xml";

    const INDEX: &str = r#"<rfc-index xmlns="http://www.rfc-editor.org/rfc-index">
  <rfc-entry>
    <doc-id>RFC0001</doc-id>
    <title>Host Software</title>
    <current-status>UNKNOWN</current-status>
  </rfc-entry>
</rfc-index>"#;

    #[test]
    fn test_catalog_is_fetched_once() {
        let fetcher = MemoryFetcher::default().with(INDEX_URL, INDEX);
        let index = IndexFetcher::new(&fetcher, Url::parse(INDEX_URL).unwrap());

        assert_eq!(index.catalog().unwrap().len(), 1);
        assert!(index.catalog().unwrap().contains("0001"));
        assert_eq!(fetcher.request_count(), 1);
    }

    #[test]
    fn test_fetch_failure_is_surfaced() {
        let fetcher = MemoryFetcher::default();
        let index = IndexFetcher::new(&fetcher, Url::parse(INDEX_URL).unwrap());

        assert!(index.catalog().unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_failure_is_surfaced_and_not_cached() {
        let fetcher = MemoryFetcher::default().with(INDEX_URL, "<html>oops</html>");
        let index = IndexFetcher::new(&fetcher, Url::parse(INDEX_URL).unwrap());

        assert!(matches!(index.catalog(), Err(AppError::Parse(_))));
        assert!(index.catalog().is_err());
        assert_eq!(fetcher.request_count(), 2);
    }
}
