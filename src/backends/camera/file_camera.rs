// SPDX-License-Identifier: GPL-3.0-only

//! File-backed camera
//!
//! Stands in for device hardware when running outside a mobile shell: each
//! capture copies a source image into a temp directory, the same way a native
//! camera leaves its shot in a temp file. The staged copy is removed by
//! [`CameraBackend::release`]; in browser mode it is kept because it backs the
//! session's preview URI.

use super::{CameraBackend, CaptureOptions, CapturedPhoto, PreviewBlob};
use crate::backends::storage::{file_uri_to_path, path_to_file_uri};
use crate::errors::{CameraError, CameraResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Camera that "captures" an existing image file
#[derive(Debug, Clone)]
pub struct FileCamera {
    source: PathBuf,
    temp_dir: PathBuf,
}

impl FileCamera {
    /// Create a camera that returns copies of `source`, staged in `temp_dir`
    pub fn new(source: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            temp_dir: temp_dir.into(),
        }
    }

    fn source_format(&self) -> String {
        let ext = self
            .source
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" | "" => "jpeg".to_string(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl CameraBackend for FileCamera {
    async fn get_photo(&self, options: &CaptureOptions) -> CameraResult<CapturedPhoto> {
        info!(
            source = %self.source.display(),
            quality = options.quality,
            "Capturing photo from file"
        );

        if !tokio::fs::try_exists(&self.source).await.unwrap_or(false) {
            return Err(CameraError::CaptureFailed(format!(
                "Source image {} does not exist",
                self.source.display()
            )));
        }

        tokio::fs::create_dir_all(&self.temp_dir)
            .await
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let format = self.source_format();
        let staged = self
            .temp_dir
            .join(format!("{}.{}", uuid::Uuid::new_v4(), format));

        tokio::fs::copy(&self.source, &staged)
            .await
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        debug!(path = %staged.display(), "Photo staged in temp directory");

        let uri = path_to_file_uri(&staged);
        Ok(CapturedPhoto {
            path: Some(uri.clone()),
            web_path: Some(uri),
            format,
        })
    }

    async fn fetch_web_path(&self, web_path: &str) -> CameraResult<PreviewBlob> {
        let path = file_uri_to_path(web_path);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CameraError::FetchFailed {
                uri: web_path.to_string(),
                reason: e.to_string(),
            })?;

        let mime = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or("image/jpeg")
            .to_string();

        debug!(uri = web_path, mime = %mime, size = bytes.len(), "Fetched preview blob");

        Ok(PreviewBlob { mime, bytes })
    }

    async fn release(&self, captured: &CapturedPhoto) -> CameraResult<()> {
        let Some(uri) = captured.path.as_deref() else {
            return Ok(());
        };

        let path = file_uri_to_path(uri);
        let temp_dir = std::path::absolute(&self.temp_dir).unwrap_or_else(|_| self.temp_dir.clone());
        if !path.starts_with(&temp_dir) {
            debug!(path = %path.display(), "Not a staged capture, leaving in place");
            return Ok(());
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Removed staged capture");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CameraError::CaptureFailed(format!(
                "Could not remove staged capture {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
