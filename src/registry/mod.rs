// SPDX-License-Identifier: GPL-3.0-only

//! Photo registry
//!
//! Keeps the newest-first index of stored photos and mirrors it into the
//! key/value cache:
//!
//! ```text
//! capture → encode → write file → prepend to index → cache index
//! delete  → remove from index → cache index → delete file
//! ```
//!
//! Lifecycle: construct → [`load_persisted`](PhotoRegistry::load_persisted)
//! → [`capture_and_store`](PhotoRegistry::capture_and_store) /
//! [`delete_at`](PhotoRegistry::delete_at) → drop.

pub mod photo;
pub mod strategy;

pub use photo::{Photo, parse_index, serialize_index};
pub use strategy::StorageStrategy;

use crate::backends::{Capabilities, CaptureOptions, Directory};
use crate::constants::{PHOTO_STORAGE_KEY, file_name_from_path, photo_file_name};
use crate::errors::{AppResult, RegistryError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// When the cache write issued by a mutation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheWritePolicy {
    /// Spawned in the background; failures are logged and dropped.
    /// Use [`PhotoRegistry::flush`] to wait for it.
    #[default]
    Detached,
    /// Part of the operation; failures are returned to the caller
    Awaited,
}

/// Registry tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryOptions {
    pub cache_writes: CacheWritePolicy,
    pub capture: CaptureOptions,
}

/// Owner of the in-memory photo index
pub struct PhotoRegistry {
    photos: Vec<Photo>,
    capabilities: Capabilities,
    strategy: StorageStrategy,
    options: RegistryOptions,
    last_timestamp_ms: i64,
    pending_write: Option<JoinHandle<()>>,
}

impl PhotoRegistry {
    /// Create an empty registry; the storage strategy is fixed here
    pub fn new(capabilities: Capabilities, options: RegistryOptions) -> Self {
        let strategy = StorageStrategy::for_platform(capabilities.platform.mode());
        info!(?strategy, cache_writes = ?options.cache_writes, "Photo registry created");

        Self {
            photos: Vec::new(),
            capabilities,
            strategy,
            options,
            last_timestamp_ms: 0,
            pending_write: None,
        }
    }

    pub fn strategy(&self) -> StorageStrategy {
        self.strategy
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Current index, newest first
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Replace the index with the one stored in the cache
    ///
    /// In browser mode every record's `web_view_path` is rebuilt from its
    /// stored bytes. A record whose file cannot be read keeps its cached
    /// `web_view_path`.
    pub async fn load_persisted(&mut self) -> AppResult<()> {
        self.flush().await;

        let cached = self.capabilities.preferences.get(PHOTO_STORAGE_KEY).await?;
        let mut photos = parse_index(cached.as_deref());

        if self.strategy.rewrites_on_load() {
            for photo in photos.iter_mut() {
                if let Err(e) = self
                    .strategy
                    .refresh_web_view_path(photo, self.capabilities.storage.as_ref())
                    .await
                {
                    warn!(filepath = %photo.filepath, error = %e, "Could not reload stored photo");
                }
            }
        }

        info!(count = photos.len(), "Loaded persisted photos");
        self.photos = photos;
        Ok(())
    }

    /// Take a photo, store it and put it at the head of the index
    ///
    /// Returns the new record, still carrying its base64 payload. The index
    /// keeps the record without it.
    pub async fn capture_and_store(&mut self) -> AppResult<Photo> {
        let Capabilities {
            camera,
            storage,
            platform,
            ..
        } = self.capabilities.clone();

        let captured = camera.get_photo(&self.options.capture).await?;
        debug!(path = ?captured.path, web_path = ?captured.web_path, "Photo captured");

        let payload = self
            .strategy
            .encode_to_base64(&captured, camera.as_ref(), storage.as_ref())
            .await?;

        if self.strategy.releases_capture()
            && let Err(e) = camera.release(&captured).await
        {
            warn!(path = ?captured.path, error = %e, "Could not release camera temp file");
        }

        let file_name = self.next_file_name();
        let saved = storage.write(&file_name, &payload, Directory::Data).await?;

        let photo =
            self.strategy
                .build_record(&captured, &file_name, saved, payload, platform.as_ref())?;

        self.photos.insert(0, photo.without_payload());
        info!(filepath = %photo.filepath, count = self.photos.len(), "Photo stored");

        self.persist().await?;
        Ok(photo)
    }

    /// Remove the record at `position` and delete its stored file
    ///
    /// The index and cache are updated before the file is deleted; a failed
    /// delete leaves the file orphaned but the record gone.
    pub async fn delete_at(&mut self, position: usize) -> AppResult<Photo> {
        if position >= self.photos.len() {
            return Err(RegistryError::IndexOutOfRange {
                index: position,
                len: self.photos.len(),
            }
            .into());
        }

        let removed = self.photos.remove(position);
        self.persist().await?;

        let file_name = file_name_from_path(&removed.filepath);
        info!(position, file_name, "Deleting stored photo");
        self.capabilities
            .storage
            .delete(file_name, Directory::Data)
            .await?;

        Ok(removed)
    }

    /// Wait for any detached cache write to settle
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending_write.take()
            && let Err(e) = handle.await
        {
            warn!(error = %e, "Cache write task failed");
        }
    }

    /// Write the current index to the cache according to the write policy
    async fn persist(&mut self) -> AppResult<()> {
        let value = serialize_index(&self.photos)?;
        let preferences = Arc::clone(&self.capabilities.preferences);

        match self.options.cache_writes {
            CacheWritePolicy::Awaited => {
                self.flush().await;
                preferences.set(PHOTO_STORAGE_KEY, &value).await?;
                debug!(count = self.photos.len(), "Photo index cached");
            }
            CacheWritePolicy::Detached => {
                // Chain onto the previous write so the cache ends on the latest snapshot
                let previous = self.pending_write.take();
                self.pending_write = Some(tokio::spawn(async move {
                    if let Some(previous) = previous
                        && let Err(e) = previous.await
                    {
                        warn!(error = %e, "Previous cache write task failed");
                    }
                    match preferences.set(PHOTO_STORAGE_KEY, &value).await {
                        Ok(()) => debug!("Photo index cached"),
                        Err(e) => warn!(error = %e, "Detached cache write failed"),
                    }
                }));
            }
        }
        Ok(())
    }

    /// Storage name for the next capture; never repeats within this registry
    fn next_file_name(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_timestamp_ms = now.max(self.last_timestamp_ms + 1);
        photo_file_name(self.last_timestamp_ms)
    }
}

impl std::fmt::Debug for PhotoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoRegistry")
            .field("photos", &self.photos)
            .field("strategy", &self.strategy)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
