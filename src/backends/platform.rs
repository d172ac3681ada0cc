// SPDX-License-Identifier: GPL-3.0-only

//! Host platform query and safe-URI conversion

use crate::constants::{DEFAULT_LOCAL_ORIGIN, SAFE_FILE_PATH_PREFIX};
use serde::{Deserialize, Serialize};

/// Runtime environment hosting the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformMode {
    /// Packaged mobile shell with native file URIs and camera temp files
    #[default]
    EmbeddedNative,
    /// Plain browser tab
    Browser,
}

impl PlatformMode {
    pub fn is_embedded_native(&self) -> bool {
        matches!(self, PlatformMode::EmbeddedNative)
    }
}

impl std::fmt::Display for PlatformMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformMode::EmbeddedNative => write!(f, "embedded"),
            PlatformMode::Browser => write!(f, "browser"),
        }
    }
}

impl std::str::FromStr for PlatformMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "embedded" | "embedded_native" | "native" | "hybrid" => Ok(PlatformMode::EmbeddedNative),
            "browser" | "web" => Ok(PlatformMode::Browser),
            other => Err(format!("Unknown platform mode: {}", other)),
        }
    }
}

/// Platform information supplied by the host
///
/// The mode is stable for the lifetime of the process.
pub trait HostPlatform: Send + Sync {
    fn mode(&self) -> PlatformMode;

    /// Map a native file URI to one the display surface can render
    fn convert_file_src(&self, uri: &str) -> String;

    fn is_embedded_native(&self) -> bool {
        self.mode().is_embedded_native()
    }
}

/// Platform with a fixed mode and local origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPlatform {
    mode: PlatformMode,
    local_origin: String,
}

impl StaticPlatform {
    pub fn new(mode: PlatformMode) -> Self {
        Self::with_origin(mode, DEFAULT_LOCAL_ORIGIN)
    }

    pub fn with_origin(mode: PlatformMode, local_origin: impl Into<String>) -> Self {
        let local_origin = local_origin.into().trim_end_matches('/').to_string();
        Self { mode, local_origin }
    }
}

impl HostPlatform for StaticPlatform {
    fn mode(&self) -> PlatformMode {
        self.mode
    }

    fn convert_file_src(&self, uri: &str) -> String {
        match uri.strip_prefix("file://") {
            Some(path) => {
                let path = if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{}", path)
                };
                format!("{}{}{}", self.local_origin, SAFE_FILE_PATH_PREFIX, path)
            }
            None if uri.starts_with('/') => {
                format!("{}{}{}", self.local_origin, SAFE_FILE_PATH_PREFIX, uri)
            }
            None => uri.to_string(),
        }
    }
}
