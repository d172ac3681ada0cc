// SPDX-License-Identifier: MPL-2.0

//! Photo Registry - capture, store and index photos on a mobile host
//!
//! This library keeps a newest-first index of captured photos. Each capture is
//! encoded to base64, written through the host's file storage, prepended to the
//! index, and the index is mirrored into a key/value cache so it survives
//! restarts.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: Host capabilities (camera, file storage, key/value cache, platform)
//! - [`registry`]: The photo index and its platform strategy
//! - [`config`]: User configuration handling
//! - [`constants`]: Cache key, file naming and URI constants
//! - [`errors`]: Error taxonomy
//!
//! # Example
//!
//! ```ignore
//! let mut registry = PhotoRegistry::new(capabilities, RegistryOptions::default());
//! registry.load_persisted().await?;
//! registry.capture_and_store().await?;
//! for photo in registry.photos() {
//!     println!("{}", photo.web_view_path);
//! }
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod registry;

// Re-export commonly used types
pub use backends::{Capabilities, PlatformMode};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use registry::{CacheWritePolicy, Photo, PhotoRegistry, RegistryOptions, StorageStrategy};
