// src/storage/local.rs

//! Local filesystem layout of downloaded documents.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── rfc_0001.txt
//! ├── rfc_0001.html
//! └── rfc_2581.pdf
//! ```
//!
//! A document counts as downloaded when its file exists and is not empty.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AppError, Result};
use crate::models::Format;

const FILE_PREFIX: &str = "rfc_";

/// Download directory and the naming scheme inside it.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// File name for an identifier in a format, e.g. `rfc_0793.txt`.
    pub fn file_name(identifier: &str, format: Format) -> String {
        format!("{FILE_PREFIX}{identifier}.{}", format.extension())
    }

    /// Recover the identifier from a name produced by [`Self::file_name`].
    pub fn identifier_of(path: &Path) -> Option<&str> {
        path.file_stem()?
            .to_str()?
            .strip_prefix(FILE_PREFIX)
            .filter(|id| !id.is_empty())
    }

    /// Full path for an identifier in a format.
    pub fn path(&self, identifier: &str, format: Format) -> PathBuf {
        self.root_dir.join(Self::file_name(identifier, format))
    }

    /// Whether a non-empty copy is already on disk.
    pub fn is_present(&self, identifier: &str, format: Format) -> bool {
        fs::metadata(self.path(identifier, format))
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false)
    }

    /// Create the download directory if missing.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root_dir)?;
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    pub fn write(&self, identifier: &str, format: Format, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(identifier, format);
        let tmp = path.with_extension(format!("{}.tmp", format.extension()));

        let written = fs::File::create(&tmp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.flush()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(path)
    }

    /// Every local copy in `format`, searched recursively, sorted by path.
    ///
    /// Symbolic links are not followed.
    pub fn files(&self, format: Format) -> Result<Vec<PathBuf>> {
        if !self.root_dir.is_dir() {
            return Ok(Vec::new());
        }

        let extension = format.extension();
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root_dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
            {
                found.push(entry.into_path());
            }
        }
        found.sort();
        Ok(found)
    }

    /// Read a local copy as text, replacing invalid UTF-8.
    pub fn read_text(path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", path.display()),
            ))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
