// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo registry

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result alias for camera capability calls
pub type CameraResult<T> = Result<T, CameraError>;

/// Result alias for file storage capability calls
pub type StorageResult<T> = Result<T, StorageError>;

/// Result alias for key/value cache capability calls
pub type CacheResult<T> = Result<T, CacheError>;

/// Main error type returned by registry operations
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Camera-related errors
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
    /// Storage/filesystem errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Key/value cache errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    /// Index bookkeeping errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Camera capability errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    /// User dismissed the capture prompt
    #[error("Capture cancelled by user")]
    Cancelled,
    /// Camera access was refused
    #[error("Camera permission denied")]
    PermissionDenied,
    /// Capture result lacks the field the active platform needs
    #[error("Captured photo has no {0}")]
    MissingField(&'static str),
    /// Preview could not be fetched as a blob
    #[error("Failed to fetch preview {uri}: {reason}")]
    FetchFailed { uri: String, reason: String },
    /// Hardware or backend failure
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// File storage capability errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Requested path does not exist
    #[error("File does not exist: {0}")]
    NotFound(String),
    /// Payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),
    /// Path escapes the storage directory it is relative to
    #[error("Path not allowed inside a storage directory: {0}")]
    InvalidPath(String),
    /// Underlying I/O failure
    #[error("I/O failure: {0}")]
    Io(String),
}

/// Key/value cache capability errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    /// Backing store could not be read
    #[error("Failed to read cache: {0}")]
    ReadFailed(String),
    /// Backing store could not be written
    #[error("Failed to write cache: {0}")]
    WriteFailed(String),
    /// Index could not be serialized
    #[error("Failed to serialize index: {0}")]
    Serialize(String),
}

/// Registry bookkeeping errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Delete position outside the current index
    #[error("Position {index} out of range for {len} photos")]
    IndexOutOfRange { index: usize, len: usize },
}

// Conversions for I/O errors
impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(err.to_string()),
            _ => StorageError::Io(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.into())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialize(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Cache(err.into())
    }
}
