// SPDX-License-Identifier: MPL-2.0

//! Host capability layer
//!
//! The registry only orchestrates; everything that touches hardware or disk
//! goes through one of these capabilities:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                PhotoRegistry                 │
//! └──────┬──────────┬───────────┬──────────┬────┘
//!        │          │           │          │
//!   ┌────┴───┐ ┌────┴────┐ ┌────┴─────┐ ┌──┴───────┐
//!   │ Camera │ │ Storage │ │ KeyValue │ │ Platform │
//!   └────────┘ └─────────┘ └──────────┘ └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Single-shot capture and preview fetching
//! - [`storage`]: Base64 file storage rooted in well-known directories
//! - [`preferences`]: Key/value cache for the serialized index
//! - [`platform`]: Embedded-native vs browser detection, safe URIs
//!
//! Each module also ships a local host implementation so the registry can run
//! outside a mobile shell.

pub mod camera;
pub mod platform;
pub mod preferences;
pub mod storage;

pub use camera::{CameraBackend, CaptureOptions, CapturedPhoto, FileCamera, PreviewBlob};
pub use platform::{HostPlatform, PlatformMode, StaticPlatform};
pub use preferences::{JsonFileStore, KeyValueStore, MemoryStore};
pub use storage::{Directory, FileStorage, LocalFileStorage, ReadFileResult, WriteFileResult};

use std::sync::Arc;

/// Capability handles shared with a registry
#[derive(Clone)]
pub struct Capabilities {
    pub camera: Arc<dyn CameraBackend>,
    pub storage: Arc<dyn FileStorage>,
    pub preferences: Arc<dyn KeyValueStore>,
    pub platform: Arc<dyn HostPlatform>,
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("platform", &self.platform.mode())
            .finish_non_exhaustive()
    }
}
