// src/models/config.rs

//! Application configuration structures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable overriding the download directory.
pub const DOWNLOAD_DIR_ENV: &str = "RFCDOWNLOADER_FOLDER";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Remote index location
    #[serde(default)]
    pub index: IndexConfig,

    /// Local download directory
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.index.index_file.trim().is_empty() {
            return Err(AppError::validation("index.index_file is empty"));
        }
        if self.storage.download_dir.trim().is_empty() {
            return Err(AppError::validation("storage.download_dir is empty"));
        }
        self.site_url()?;
        Ok(())
    }

    /// Base URL that documents and the index are resolved against.
    pub fn site_url(&self) -> Result<Url> {
        let mut raw = self.index.site_url.trim().to_string();
        // Url::join drops the last segment unless the base ends with '/'
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| AppError::config(format!("index.site_url '{raw}': {e}")))
    }

    /// Full URL of the XML index.
    pub fn index_url(&self) -> Result<Url> {
        Ok(self.site_url()?.join(&self.index.index_file)?)
    }

    /// Download directory, honoring the environment override.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir_with(env::var(DOWNLOAD_DIR_ENV).ok().as_deref())
    }

    /// Download directory given the value of the override, if any.
    fn download_dir_with(&self, override_dir: Option<&str>) -> PathBuf {
        let raw = override_dir
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(&self.storage.download_dir);
        expand_home(raw)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Where the RFC index and documents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Site that serves both the index and the documents
    #[serde(default = "defaults::site_url")]
    pub site_url: String,

    /// Index file name, relative to `site_url`
    #[serde(default = "defaults::index_file")]
    pub index_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            site_url: defaults::site_url(),
            index_file: defaults::index_file(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "defaults::download_dir")]
    pub download_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: defaults::download_dir(),
        }
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest.trim_start_matches(['/', '\\']));
            }
        }
    }
    PathBuf::from(raw)
}

mod defaults {
    pub fn user_agent() -> String {
        concat!("rfcutils/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn site_url() -> String {
        "https://www.ietf.org/rfc/".into()
    }
    pub fn index_file() -> String {
        "rfc-index.xml".into()
    }
    pub fn download_dir() -> String {
        "./rfc".into()
    }
}
