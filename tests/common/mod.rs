// SPDX-License-Identifier: MPL-2.0

//! In-memory test doubles for the host capabilities

#![allow(dead_code)]

use async_trait::async_trait;
use photo_registry::backends::{
    CameraBackend, Capabilities, CaptureOptions, CapturedPhoto, Directory, FileStorage,
    KeyValueStore, MemoryStore, PlatformMode, PreviewBlob, ReadFileResult, StaticPlatform,
    WriteFileResult,
};
use photo_registry::errors::{
    CacheError, CacheResult, CameraError, CameraResult, StorageError, StorageResult,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Camera that replays queued results
#[derive(Default)]
pub struct ScriptedCamera {
    shots: Mutex<VecDeque<CameraResult<CapturedPhoto>>>,
    blobs: Mutex<HashMap<String, PreviewBlob>>,
    pub requests: Mutex<Vec<CaptureOptions>>,
    pub released: Mutex<Vec<Option<String>>>,
}

impl ScriptedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a native capture leaving a temp file at `path`
    pub fn push_native(&self, path: &str) {
        self.push(Ok(CapturedPhoto {
            path: Some(path.to_string()),
            web_path: Some(format!("capacitor://preview/{}", path)),
            format: "jpeg".to_string(),
        }));
    }

    /// Queue a browser capture whose preview serves `bytes`
    pub fn push_browser(&self, web_path: &str, bytes: &[u8]) {
        self.blobs.lock().unwrap().insert(
            web_path.to_string(),
            PreviewBlob {
                mime: "image/jpeg".to_string(),
                bytes: bytes.to_vec(),
            },
        );
        self.push(Ok(CapturedPhoto {
            path: None,
            web_path: Some(web_path.to_string()),
            format: "jpeg".to_string(),
        }));
    }

    pub fn push(&self, shot: CameraResult<CapturedPhoto>) {
        self.shots.lock().unwrap().push_back(shot);
    }
}

#[async_trait]
impl CameraBackend for ScriptedCamera {
    async fn get_photo(&self, options: &CaptureOptions) -> CameraResult<CapturedPhoto> {
        self.requests.lock().unwrap().push(*options);
        self.shots
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CameraError::Cancelled))
    }

    async fn fetch_web_path(&self, web_path: &str) -> CameraResult<PreviewBlob> {
        self.blobs
            .lock()
            .unwrap()
            .get(web_path)
            .cloned()
            .ok_or_else(|| CameraError::FetchFailed {
                uri: web_path.to_string(),
                reason: "no such blob".to_string(),
            })
    }

    async fn release(&self, captured: &CapturedPhoto) -> CameraResult<()> {
        self.released.lock().unwrap().push(captured.path.clone());
        Ok(())
    }
}

/// Storage keeping base64 strings in a map
///
/// Data-directory files are exposed as `file:///data/<name>`.
#[derive(Default)]
pub struct MemoryFileStorage {
    files: Mutex<HashMap<String, String>>,
    pub deleted: Mutex<Vec<(String, Directory)>>,
    pub fail_writes: Mutex<bool>,
    pub fail_deletes: Mutex<bool>,
}

impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file directly at `key` (a data file name or a full URI)
    pub fn seed(&self, key: &str, data: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.files.lock().unwrap().contains_key(key)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    fn key(path: &str, directory: Option<Directory>) -> String {
        match directory {
            Some(Directory::Data) => path
                .strip_prefix("file:///data/")
                .unwrap_or(path)
                .to_string(),
            _ => path.to_string(),
        }
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn write(
        &self,
        name: &str,
        data: &str,
        directory: Directory,
    ) -> StorageResult<WriteFileResult> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io("disk full".to_string()));
        }
        let payload = data
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(data);
        self.seed(&Self::key(name, Some(directory)), payload);
        Ok(WriteFileResult {
            uri: format!("file:///data/{}", name),
        })
    }

    async fn read(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> StorageResult<ReadFileResult> {
        self.files
            .lock()
            .unwrap()
            .get(&Self::key(path, directory))
            .cloned()
            .map(|data| ReadFileResult { data })
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &str, directory: Directory) -> StorageResult<()> {
        self.deleted
            .lock()
            .unwrap()
            .push((path.to_string(), directory));
        if *self.fail_deletes.lock().unwrap() {
            return Err(StorageError::Io("read-only filesystem".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .remove(&Self::key(path, Some(directory)))
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

/// Key/value store whose writes always fail
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> CacheResult<()> {
        Err(CacheError::WriteFailed("quota exceeded".to_string()))
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        self.inner.remove(key).await
    }
}

/// Key/value store whose first write panics, then behaves normally
#[derive(Default)]
pub struct PanicOnceStore {
    pub inner: MemoryStore,
    panicked: Mutex<bool>,
}

#[async_trait]
impl KeyValueStore for PanicOnceStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let first = !std::mem::replace(&mut *self.panicked.lock().unwrap(), true);
        if first {
            panic!("storage bridge crashed");
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        self.inner.remove(key).await
    }
}

/// Handles to every double behind a registry
pub struct Host {
    pub camera: Arc<ScriptedCamera>,
    pub storage: Arc<MemoryFileStorage>,
    pub preferences: Arc<dyn KeyValueStore>,
    pub mode: PlatformMode,
}

impl Host {
    pub fn new(mode: PlatformMode) -> Self {
        Self::with_preferences(mode, Arc::new(MemoryStore::new()))
    }

    pub fn with_preferences(mode: PlatformMode, preferences: Arc<dyn KeyValueStore>) -> Self {
        Self {
            camera: Arc::new(ScriptedCamera::new()),
            storage: Arc::new(MemoryFileStorage::new()),
            preferences,
            mode,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            camera: self.camera.clone(),
            storage: self.storage.clone(),
            preferences: self.preferences.clone(),
            platform: Arc::new(StaticPlatform::new(self.mode)),
        }
    }
}
