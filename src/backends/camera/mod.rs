// SPDX-License-Identifier: MPL-2.0

//! Camera capability abstraction
//!
//! The registry never talks to camera hardware directly. A host supplies a
//! [`CameraBackend`] that hands back either a temp file (native shells) or a
//! renderable preview URI (browsers), or both.

pub mod file_camera;
pub mod types;

pub use file_camera::FileCamera;
pub use types::*;

use crate::errors::CameraResult;
use async_trait::async_trait;

/// Camera capability provided by the host
#[async_trait]
pub trait CameraBackend: Send + Sync {
    /// Capture a single photo
    ///
    /// Fails with [`CameraError::Cancelled`](crate::errors::CameraError::Cancelled)
    /// or [`CameraError::PermissionDenied`](crate::errors::CameraError::PermissionDenied)
    /// when the user declines.
    async fn get_photo(&self, options: &CaptureOptions) -> CameraResult<CapturedPhoto>;

    /// Fetch a preview URI returned by [`get_photo`](Self::get_photo) as a binary blob
    async fn fetch_web_path(&self, web_path: &str) -> CameraResult<PreviewBlob>;

    /// Drop any temp file left behind by [`get_photo`](Self::get_photo)
    ///
    /// Called once the capture has been encoded. Hosts without temp files
    /// keep the default no-op.
    async fn release(&self, _captured: &CapturedPhoto) -> CameraResult<()> {
        Ok(())
    }
}
