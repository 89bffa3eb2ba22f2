// src/models/catalog.rs

//! The RFC catalog and the `rfc-index.xml` parser that builds it.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{AppError, Result};
use crate::models::entry::{IndexEntry, normalize_identifier};

/// Namespace of the RFC Editor index.
pub const RFC_INDEX_NAMESPACE: &[u8] = b"http://www.rfc-editor.org/rfc-index";

const ROOT_TAG: &[u8] = b"rfc-index";
const ENTRY_TAG: &[u8] = b"rfc-entry";
const DOC_ID_TAG: &[u8] = b"doc-id";
const TITLE_TAG: &[u8] = b"title";
const FORMAT_TAG: &[u8] = b"format";
const FILE_FORMAT_TAG: &[u8] = b"file-format";
const CURRENT_STATUS_TAG: &[u8] = b"current-status";
const ABSTRACT_TAG: &[u8] = b"abstract";

/// Identifier → entry mapping, ordered by identifier.
///
/// Built once from the index and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, IndexEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers.
    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            match map.entry(entry.identifier.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(slot) => {
                    return Err(AppError::parse(format!(
                        "duplicate identifier {} in index",
                        slot.key()
                    )));
                }
            }
        }
        Ok(Self { entries: map })
    }

    /// Parse the XML index.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::from_entries(IndexParser::default().parse(xml)?)
    }

    pub fn get(&self, identifier: &str) -> Option<&IndexEntry> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }
}

/// Fields collected while inside one `rfc-entry`.
#[derive(Debug, Default)]
struct EntryBuilder {
    doc_id: String,
    title: String,
    formats: Vec<String>,
    status: Option<String>,
    paragraphs: Vec<String>,
}

impl EntryBuilder {
    fn build(self) -> Result<IndexEntry> {
        let doc_id = self.doc_id.trim();
        if doc_id.is_empty() {
            return Err(AppError::parse("rfc-entry without doc-id"));
        }
        let number = doc_id
            .strip_prefix("RFC")
            .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| AppError::parse(format!("unexpected doc-id '{doc_id}'")))?;

        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::parse(format!("{doc_id} has no current-status")))?;

        let abstract_text = self
            .paragraphs
            .iter()
            .map(|p| normalize_whitespace(p))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(IndexEntry {
            identifier: normalize_identifier(number),
            title: normalize_whitespace(&self.title),
            abstract_text,
            status,
            formats: self
                .formats
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        })
    }
}

/// Streaming parser over `rfc-index.xml`.
///
/// Only direct children of `rfc-entry` are read, so the `doc-id` nodes
/// nested under `obsoletes`/`updated-by` never leak into the entry.
#[derive(Debug, Default)]
struct IndexParser {
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    /// Stack depth of the open `rfc-entry`, if any.
    entry_depth: Option<usize>,
    current: Option<EntryBuilder>,
    entries: Vec<IndexEntry>,
    saw_root: bool,
}

impl IndexParser {
    fn parse(mut self, xml: &[u8]) -> Result<Vec<IndexEntry>> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => self.open(&e)?,
                Event::End(_) => self.close()?,
                Event::Empty(e) => {
                    // Self-closing: open and close immediately.
                    self.open(&e)?;
                    self.close()?;
                }
                Event::Text(t) => {
                    let text = t.unescape()?;
                    self.text(&text);
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    self.text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !self.saw_root {
            return Err(AppError::parse("document has no rfc-index root"));
        }
        if !self.stack.is_empty() {
            return Err(AppError::parse("unexpected end of document"));
        }
        Ok(self.entries)
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = e.local_name().as_ref().to_vec();

        if self.stack.is_empty() {
            if name != ROOT_TAG {
                return Err(AppError::parse(format!(
                    "unexpected root element '{}'",
                    String::from_utf8_lossy(&name)
                )));
            }
            let xmlns = e.try_get_attribute("xmlns").map_err(AppError::parse)?;
            if let Some(ns) = xmlns {
                if ns.value.as_ref() != RFC_INDEX_NAMESPACE {
                    return Err(AppError::parse(format!(
                        "unexpected namespace '{}'",
                        String::from_utf8_lossy(&ns.value)
                    )));
                }
            }
            self.saw_root = true;
        }

        self.stack.push(name);

        let entry_depth = self.entry_depth;
        match entry_depth {
            None if self.stack.len() == 2 && self.top_is(ENTRY_TAG) => {
                self.entry_depth = Some(self.stack.len());
                self.current = Some(EntryBuilder::default());
            }
            Some(depth) => {
                if let Some(builder) = self.current.as_mut() {
                    let path = &self.stack[depth..];
                    match path {
                        [parent, child] if parent == FORMAT_TAG && child == FILE_FORMAT_TAG => {
                            builder.formats.push(String::new());
                        }
                        [parent, _] if parent == ABSTRACT_TAG => {
                            builder.paragraphs.push(String::new());
                        }
                        [field] if field == CURRENT_STATUS_TAG => {
                            builder.status.get_or_insert_with(String::new);
                        }
                        _ => {}
                    }
                }
            }
            None => {}
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.stack.pop().is_none() {
            return Err(AppError::parse("unbalanced closing tag"));
        }
        if let Some(depth) = self.entry_depth {
            if self.stack.len() < depth {
                self.entry_depth = None;
                if let Some(builder) = self.current.take() {
                    self.entries.push(builder.build()?);
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        let (Some(depth), Some(builder)) = (self.entry_depth, self.current.as_mut()) else {
            return;
        };
        let path = &self.stack[depth.min(self.stack.len())..];
        match path {
            [field] if field == DOC_ID_TAG => builder.doc_id.push_str(text),
            [field] if field == TITLE_TAG => builder.title.push_str(text),
            [field] if field == CURRENT_STATUS_TAG => {
                builder.status.get_or_insert_with(String::new).push_str(text)
            }
            [parent, child] if parent == FORMAT_TAG && child == FILE_FORMAT_TAG => {
                if let Some(last) = builder.formats.last_mut() {
                    last.push_str(text);
                }
            }
            [parent, _, ..] if parent == ABSTRACT_TAG => {
                if let Some(last) = builder.paragraphs.last_mut() {
                    last.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn top_is(&self, tag: &[u8]) -> bool {
        self.stack.last().is_some_and(|name| name == tag)
    }
}

/// Collapse newlines and runs of spaces into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
