//! Tool configuration module.
//!
//! Handles loading and validating `albumoto.toml`. Configuration is sparse:
//! stock defaults are overridden by whatever keys the user's file specifies,
//! and a missing file simply means all defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [storage]
//! catalog_path = "albums.json"  # Where the published catalog lives
//! quota_bytes = 5242880         # Catalog size ceiling (5 MiB)
//!
//! [images]
//! max_width = 800               # Downscale bound for published images
//! quality = 70                  # JPEG re-encoding quality (1-100)
//!
//! [processing]
//! max_processes = 4             # Max parallel resize workers (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `albumoto.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Catalog persistence settings.
    pub storage: StorageConfig,
    /// Image downscaling settings.
    pub images: ImagesConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.max_width == 0 {
            return Err(ConfigError::Validation(
                "images.max_width must be non-zero".into(),
            ));
        }
        if self.storage.catalog_path.is_empty() {
            return Err(ConfigError::Validation(
                "storage.catalog_path must not be empty".into(),
            ));
        }
        if self.storage.quota_bytes == Some(0) {
            return Err(ConfigError::Validation(
                "storage.quota_bytes must be non-zero (omit to disable)".into(),
            ));
        }
        Ok(())
    }
}

/// Catalog persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Path of the JSON catalog file.
    pub catalog_path: String,
    /// Byte ceiling for the serialized catalog. Absent means unlimited.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: "albums.json".to_string(),
            quota_bytes: Some(crate::storage::DEFAULT_QUOTA_BYTES),
        }
    }
}

/// Image downscaling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Maximum pixel width of published images. Wider sources are downscaled.
    pub max_width: u32,
    /// JPEG re-encoding quality (1 = worst, 100 = best).
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            quality: 70,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel resize workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from `albumoto.toml` in the given directory.
///
/// A missing file yields the stock defaults; an existing file is parsed
/// (unknown keys rejected) and validated.
pub fn load_config(root: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = root.join("albumoto.toml");
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `albumoto.toml` with all keys and
/// explanations. Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Albumoto Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Catalog storage
# ---------------------------------------------------------------------------
[storage]
# Where the published album catalog lives.
catalog_path = "albums.json"

# Byte ceiling for the serialized catalog (5 MiB). When a publish would
# exceed it, the album is retried with placeholder media.
# Comment out to disable the quota entirely.
quota_bytes = 5242880

# ---------------------------------------------------------------------------
# Image downscaling
# ---------------------------------------------------------------------------
[images]
# Maximum pixel width of published images. Wider sources are downscaled
# (aspect preserved); narrower ones are stored as-is.
max_width = 800

# JPEG re-encoding quality for downscaled images (1 = worst, 100 = best).
quality = 70

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel resize workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
