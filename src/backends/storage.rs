// SPDX-License-Identifier: MPL-2.0

//! File storage capability and its local filesystem host
//!
//! Payloads cross the capability boundary as base64 strings, matching what a
//! mobile filesystem bridge exchanges with its web view.

use crate::errors::{StorageError, StorageResult};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Well-known storage locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// Durable application data, kept across restarts
    Data,
    /// Scratch space the OS may clear
    Cache,
}

/// Result of a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFileResult {
    /// URI of the written file
    pub uri: String,
}

/// Result of a successful read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFileResult {
    /// File contents, base64 encoded
    pub data: String,
}

/// File storage capability provided by the host
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write base64 `data` to `name` inside `directory`
    ///
    /// `data` may carry a `data:<mime>;base64,` header, which is discarded.
    async fn write(
        &self,
        name: &str,
        data: &str,
        directory: Directory,
    ) -> StorageResult<WriteFileResult>;

    /// Read `path` and return its contents as base64
    ///
    /// Without a directory, `path` is a full path or `file://` URI.
    async fn read(&self, path: &str, directory: Option<Directory>)
    -> StorageResult<ReadFileResult>;

    /// Delete `path` inside `directory`
    async fn delete(&self, path: &str, directory: Directory) -> StorageResult<()>;
}

/// Strip an optional data URI header and decode the base64 payload
pub fn decode_payload(data: &str) -> StorageResult<Vec<u8>> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| StorageError::InvalidPayload("data URI without payload".into()))?,
        None => data,
    };

    BASE64_STANDARD
        .decode(payload.trim())
        .map_err(|e| StorageError::InvalidPayload(e.to_string()))
}

/// Convert a filesystem path to a `file://` URI
pub fn path_to_file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Convert a `file://` URI back to a path; other strings are taken as paths
pub fn file_uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

fn io_error(err: std::io::Error, path: &Path) -> StorageError {
    match err.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(format!("{}: {}", path.display(), err)),
    }
}

/// Storage rooted in local directories
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Root directory backing `directory`
    pub fn root(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Data => &self.data_dir,
            Directory::Cache => &self.cache_dir,
        }
    }

    /// Map a capability path onto the local filesystem
    ///
    /// Without a directory the path is a URI or absolute path and is taken as
    /// is. With one, it must be a plain relative name that stays under that
    /// directory's root.
    fn resolve(&self, path: &str, directory: Option<Directory>) -> StorageResult<PathBuf> {
        let Some(directory) = directory else {
            return Ok(file_uri_to_path(path));
        };

        let relative = Path::new(path);
        let escapes = path.starts_with("file://")
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || escapes {
            warn!(path, ?directory, "Rejected path outside storage directory");
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        Ok(self.root(directory).join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn write(
        &self,
        name: &str,
        data: &str,
        directory: Directory,
    ) -> StorageResult<WriteFileResult> {
        let bytes = decode_payload(data)?;
        let target = self.resolve(name, Some(directory))?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(e, parent))?;
        }

        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| io_error(e, &target))?;

        info!(path = %target.display(), size = bytes.len(), "File written");

        Ok(WriteFileResult {
            uri: path_to_file_uri(&target),
        })
    }

    async fn read(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> StorageResult<ReadFileResult> {
        let target = self.resolve(path, directory)?;
        let bytes = tokio::fs::read(&target)
            .await
            .map_err(|e| io_error(e, &target))?;

        debug!(path = %target.display(), size = bytes.len(), "File read");

        Ok(ReadFileResult {
            data: BASE64_STANDARD.encode(bytes),
        })
    }

    async fn delete(&self, path: &str, directory: Directory) -> StorageResult<()> {
        let target = self.resolve(path, Some(directory))?;
        tokio::fs::remove_file(&target)
            .await
            .map_err(|e| io_error(e, &target))?;

        info!(path = %target.display(), "File deleted");
        Ok(())
    }
}
