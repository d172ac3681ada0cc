// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Cache key under which the whole photo index is serialized
pub const PHOTO_STORAGE_KEY: &str = "photos";

/// Extension given to every stored photo
pub const PHOTO_FILE_EXTENSION: &str = "jpeg";

/// Prefix used to render stored photos inline in browser mode
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Path segment that marks a native file served through the local origin
pub const SAFE_FILE_PATH_PREFIX: &str = "/_capacitor_file_";

/// Default origin used when converting native file URIs
pub const DEFAULT_LOCAL_ORIGIN: &str = "http://localhost";

/// Highest capture quality a camera accepts
pub const MAX_CAPTURE_QUALITY: u8 = 100;

/// Application directory name under the platform data/config/cache dirs
pub const APP_DIR_NAME: &str = "photo-registry";

/// Build the storage file name for a capture taken at `timestamp_ms`
pub fn photo_file_name(timestamp_ms: i64) -> String {
    format!("{}.{}", timestamp_ms, PHOTO_FILE_EXTENSION)
}

/// Trailing path segment of a stored photo's `filepath`
///
/// Works for both bare file names and `file://` URIs.
pub fn file_name_from_path(filepath: &str) -> &str {
    match filepath.rfind('/') {
        Some(idx) => &filepath[idx + 1..],
        None => filepath,
    }
}
