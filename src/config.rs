// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::{CaptureOptions, PlatformMode};
use crate::constants::{APP_DIR_NAME, DEFAULT_LOCAL_ORIGIN, MAX_CAPTURE_QUALITY};
use crate::errors::{AppError, AppResult};
use crate::registry::{CacheWritePolicy, RegistryOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the configuration inside the app config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Runtime environment (embedded native shell or browser)
    pub platform: PlatformMode,
    /// Whether mutations wait for the cache write
    pub cache_writes: CacheWritePolicy,
    /// JPEG quality requested from the camera (1-100)
    pub capture_quality: u8,
    /// Durable application-data directory
    pub data_dir: Option<PathBuf>,
    /// Scratch directory for camera temp files
    pub cache_dir: Option<PathBuf>,
    /// Key/value store file
    pub preferences_path: Option<PathBuf>,
    /// Origin used when converting native file URIs for display
    pub local_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: PlatformMode::default(), // Embedded native shell
            cache_writes: CacheWritePolicy::default(), // Detached, never blocks the caller
            capture_quality: MAX_CAPTURE_QUALITY,
            data_dir: None,
            cache_dir: None,
            preferences_path: None,
            local_origin: DEFAULT_LOCAL_ORIGIN.to_string(),
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/photo-registry/config.json`
    pub fn default_path() -> PathBuf {
        base_dir(dirs::config_dir()).join(CONFIG_FILE_NAME)
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, falling back to defaults when missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Config>(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Write this config to `path` as pretty JSON
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| base_dir(dirs::data_dir()).join("data"))
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| base_dir(dirs::cache_dir()))
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| base_dir(dirs::data_dir()).join("preferences.json"))
    }

    /// Registry options derived from this config
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            cache_writes: self.cache_writes,
            capture: CaptureOptions::with_quality(self.capture_quality),
        }
    }
}

/// `<root>/photo-registry`, using the home directory (or cwd) when `root` is unknown
fn base_dir(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_DIR_NAME)
}
