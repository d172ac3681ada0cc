// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use crate::constants::MAX_CAPTURE_QUALITY;
use serde::{Deserialize, Serialize};

/// How the camera hands back the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResultType {
    /// File reference plus a renderable preview URI
    #[default]
    Uri,
    /// Inline base64 payload
    Base64,
    /// Inline data URI
    DataUrl,
}

/// Where the image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraSource {
    /// Live camera
    #[default]
    Camera,
    /// Existing photo library
    Photos,
    /// Let the user pick
    Prompt,
}

/// Options passed to a single capture request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub result_type: ResultType,
    pub source: CameraSource,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl CaptureOptions {
    /// Single live-camera shot returned as a file reference
    pub fn with_quality(quality: u8) -> Self {
        Self {
            result_type: ResultType::Uri,
            source: CameraSource::Camera,
            quality: quality.clamp(1, MAX_CAPTURE_QUALITY),
        }
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::with_quality(MAX_CAPTURE_QUALITY)
    }
}

/// Result of a capture request
///
/// Native shells fill `path` with a temp file; browsers only provide a
/// renderable `web_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Local temp file holding the image
    pub path: Option<String>,
    /// Directly renderable preview URI
    pub web_path: Option<String>,
    /// Image format reported by the camera (e.g. "jpeg")
    pub format: String,
}

/// Binary preview fetched from a `web_path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBlob {
    /// MIME type, e.g. "image/jpeg"
    pub mime: String,
    pub bytes: Vec<u8>,
}
