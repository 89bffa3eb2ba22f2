// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and log the effective values.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("  User agent: {}", config.http.user_agent);
    log::info!("  Timeout: {}s", config.http.timeout_secs);
    log::info!("  Index: {}", config.index_url()?);
    log::info!("  Download directory: {}", config.download_dir().display());
    Ok(())
}
