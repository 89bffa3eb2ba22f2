// src/models/entry.rs

//! RFC index entry and the enumerations used to select entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Width identifiers are zero-padded to.
pub const IDENTIFIER_WIDTH: usize = 4;

/// Normalize a numeric identifier to the catalog's fixed-width form.
///
/// `"1"`, `"01"` and `"00001"` all become `"0001"`; identifiers wider
/// than [`IDENTIFIER_WIDTH`] are kept as they are.
pub fn normalize_identifier(raw: &str) -> String {
    let digits = raw.trim().trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    format!("{digits:0>width$}", width = IDENTIFIER_WIDTH)
}

/// One `rfc-entry` of the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    /// Zero-padded RFC number, e.g. `0793`
    pub identifier: String,

    pub title: String,

    /// Whitespace-normalized abstract, empty if the index has none
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// `current-status` label, e.g. `PROPOSED STANDARD`
    pub status: String,

    /// `file-format` labels as declared by the index (not exhaustive)
    pub formats: Vec<String>,
}

impl IndexEntry {
    /// Remote address of this document in the given format.
    pub fn location(&self, site: &Url, format: Format) -> Result<Url> {
        Ok(site.join(&format!("rfc{}.{}", self.identifier, format.extension()))?)
    }

    /// Whether the index declares `format` for this entry.
    pub fn declares(&self, format: Format) -> bool {
        format
            .catalog_labels()
            .iter()
            .any(|label| self.formats.iter().any(|f| f == label))
    }

    /// Case-sensitive substring match against title or abstract.
    pub fn describes(&self, word: &str) -> bool {
        self.title.contains(word) || self.abstract_text.contains(word)
    }
}

/// Downloadable document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Format {
    Txt,
    Html,
    Pdf,
    Xml,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Txt, Format::Html, Format::Pdf, Format::Xml];

    /// Formats requested when the caller names none.
    pub const DEFAULTS: [Format; 3] = [Format::Txt, Format::Pdf, Format::Html];

    /// Lowercase file extension, used both remotely and locally.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Html => "html",
            Format::Pdf => "pdf",
            Format::Xml => "xml",
        }
    }

    /// Labels the index uses in `file-format` for this format.
    pub fn catalog_labels(self) -> &'static [&'static str] {
        match self {
            Format::Txt => &["TEXT", "ASCII"],
            Format::Html => &["HTML"],
            Format::Pdf => &["PDF"],
            Format::Xml => &["XML"],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for Format {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Format::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "unknown file type '{s}' (expected one of TXT, HTML, PDF, XML)"
                ))
            })
    }
}

/// Lifecycle statuses that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Unknown,
    Experimental,
    Informational,
    BestCurrentPractice,
    ProposedStandard,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Unknown,
        Status::Experimental,
        Status::Informational,
        Status::BestCurrentPractice,
        Status::ProposedStandard,
    ];

    /// Label as written in `current-status`.
    pub fn label(self) -> &'static str {
        match self {
            Status::Unknown => "UNKNOWN",
            Status::Experimental => "EXPERIMENTAL",
            Status::Informational => "INFORMATIONAL",
            Status::BestCurrentPractice => "BEST CURRENT PRACTICE",
            Status::ProposedStandard => "PROPOSED STANDARD",
        }
    }

    /// Whether an entry's status label carries this status.
    pub fn matches(self, current_status: &str) -> bool {
        current_status.contains(self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| AppError::validation(format!("unknown status '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> IndexEntry {
        IndexEntry {
            identifier: "0793".to_string(),
            title: "Transmission Control Protocol".to_string(),
            abstract_text: "Defines congestion-free byte streams".to_string(),
            status: "INTERNET STANDARD".to_string(),
            formats: vec!["ASCII".to_string(), "PDF".to_string()],
        }
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("1"), "0001");
        assert_eq!(normalize_identifier("0001"), "0001");
        assert_eq!(normalize_identifier("00001"), "0001");
        assert_eq!(normalize_identifier("9110"), "9110");
        assert_eq!(normalize_identifier("10000"), "10000");
        assert_eq!(normalize_identifier("0"), "0000");
    }

    #[test]
    fn test_location() {
        let site = Url::parse("https://www.ietf.org/rfc/").unwrap();
        let entry = sample_entry();
        assert_eq!(
            entry.location(&site, Format::Txt).unwrap().as_str(),
            "https://www.ietf.org/rfc/rfc0793.txt"
        );
        assert_eq!(
            entry.location(&site, Format::Pdf).unwrap().as_str(),
            "https://www.ietf.org/rfc/rfc0793.pdf"
        );
    }

    #[test]
    fn test_declares_maps_catalog_labels() {
        let entry = sample_entry();
        assert!(entry.declares(Format::Txt));
        assert!(entry.declares(Format::Pdf));
        assert!(!entry.declares(Format::Html));
    }

    #[test]
    fn test_describes_is_case_sensitive() {
        let entry = sample_entry();
        assert!(entry.describes("Control"));
        assert!(entry.describes("congestion"));
        assert!(!entry.describes("control protocol"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("TXT".parse::<Format>().unwrap(), Format::Txt);
        assert_eq!("pdf".parse::<Format>().unwrap(), Format::Pdf);
        assert!("doc".parse::<Format>().is_err());
        assert_eq!(Format::Html.to_string(), "HTML");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "best-current-practice".parse::<Status>().unwrap(),
            Status::BestCurrentPractice
        );
        assert_eq!(
            "PROPOSED STANDARD".parse::<Status>().unwrap(),
            Status::ProposedStandard
        );
        assert_eq!(
            "informational".parse::<Status>().unwrap(),
            Status::Informational
        );
        assert!("draft".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_matches() {
        assert!(Status::Informational.matches("INFORMATIONAL"));
        assert!(!Status::Informational.matches("EXPERIMENTAL"));
    }
}
