// SPDX-License-Identifier: GPL-3.0-only

//! Platform-specific storage strategy
//!
//! Embedded shells hand back native temp files and file URIs; browsers only
//! have an in-memory preview. The strategy is picked once from the platform
//! mode and owns every place the two differ.

use super::photo::Photo;
use crate::backends::{
    CameraBackend, CapturedPhoto, Directory, FileStorage, HostPlatform, PlatformMode,
    PreviewBlob, WriteFileResult,
};
use crate::constants::JPEG_DATA_URI_PREFIX;
use crate::errors::{AppResult, CameraError, CameraResult, StorageResult};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use tracing::debug;

/// How photos are encoded, located and rendered on the current platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStrategy {
    /// Native shell: read temp files, keep storage URIs
    Embedded,
    /// Browser tab: fetch previews, keep file names, inline data on reload
    Browser,
}

impl StorageStrategy {
    pub fn for_platform(mode: PlatformMode) -> Self {
        match mode {
            PlatformMode::EmbeddedNative => StorageStrategy::Embedded,
            PlatformMode::Browser => StorageStrategy::Browser,
        }
    }

    /// Encode a captured photo as base64 for the storage capability
    pub async fn encode_to_base64(
        &self,
        captured: &CapturedPhoto,
        camera: &dyn CameraBackend,
        storage: &dyn FileStorage,
    ) -> AppResult<String> {
        match self {
            StorageStrategy::Embedded => {
                let path = captured
                    .path
                    .as_deref()
                    .ok_or(CameraError::MissingField("file path"))?;
                let file = storage.read(path, None).await?;
                debug!(path, size = file.data.len(), "Read captured temp file");
                Ok(file.data)
            }
            StorageStrategy::Browser => {
                let web_path = captured
                    .web_path
                    .as_deref()
                    .ok_or(CameraError::MissingField("web path"))?;
                let blob = camera.fetch_web_path(web_path).await?;
                Ok(read_as_data_uri(blob).await?)
            }
        }
    }

    /// Build the index record for a photo written as `file_name`
    ///
    /// The returned record still carries `payload`.
    pub fn build_record(
        &self,
        captured: &CapturedPhoto,
        file_name: &str,
        saved: WriteFileResult,
        payload: String,
        platform: &dyn HostPlatform,
    ) -> AppResult<Photo> {
        let mut photo = match self {
            StorageStrategy::Embedded => {
                let web_view_path = platform.convert_file_src(&saved.uri);
                Photo::new(saved.uri, web_view_path)
            }
            StorageStrategy::Browser => {
                let web_path = captured
                    .web_path
                    .clone()
                    .ok_or(CameraError::MissingField("web path"))?;
                Photo::new(file_name, web_path)
            }
        };
        photo.base64 = Some(payload);
        Ok(photo)
    }

    /// Whether the camera's temp file can go once the payload is encoded
    ///
    /// Browser records keep the camera's preview URI as their
    /// `web_view_path`, so its backing file has to outlive the capture.
    pub fn releases_capture(&self) -> bool {
        matches!(self, StorageStrategy::Embedded)
    }

    /// Whether reloaded records need their `web_view_path` rebuilt
    pub fn rewrites_on_load(&self) -> bool {
        matches!(self, StorageStrategy::Browser)
    }

    /// Rebuild a reloaded record's `web_view_path` from its stored bytes
    ///
    /// Embedded records are left untouched.
    pub async fn refresh_web_view_path(
        &self,
        photo: &mut Photo,
        storage: &dyn FileStorage,
    ) -> StorageResult<()> {
        if !self.rewrites_on_load() {
            return Ok(());
        }
        let file = storage.read(&photo.filepath, Some(Directory::Data)).await?;
        photo.web_view_path = format!("{}{}", JPEG_DATA_URI_PREFIX, file.data);
        Ok(())
    }
}

/// Encode a blob as a `data:` URI
pub fn blob_to_data_uri(blob: &PreviewBlob) -> String {
    format!(
        "data:{};base64,{}",
        blob.mime,
        BASE64_STANDARD.encode(&blob.bytes)
    )
}

/// Convert a fetched blob to a data URI off the async executor
async fn read_as_data_uri(blob: PreviewBlob) -> CameraResult<String> {
    tokio::task::spawn_blocking(move || blob_to_data_uri(&blob))
        .await
        .map_err(|e| CameraError::CaptureFailed(format!("Encoding task error: {}", e)))
}
