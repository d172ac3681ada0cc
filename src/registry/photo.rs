// SPDX-License-Identifier: GPL-3.0-only

//! Photo record and its cache encoding

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A stored photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Locates the stored bytes: a storage URI (embedded) or file name (browser)
    pub filepath: String,
    /// Renderable form: a safe URI or an inline data URI
    #[serde(default)]
    pub web_view_path: String,
    /// Encoded payload, only present right after capture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}

impl Photo {
    pub fn new(filepath: impl Into<String>, web_view_path: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            web_view_path: web_view_path.into(),
            base64: None,
        }
    }

    /// Copy of this record with the transient payload dropped
    pub fn without_payload(&self) -> Self {
        Self {
            filepath: self.filepath.clone(),
            web_view_path: self.web_view_path.clone(),
            base64: None,
        }
    }
}

/// Cached shape of a record; has no room for the payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPhoto<'a> {
    filepath: &'a str,
    web_view_path: &'a str,
}

/// Encode the index as the JSON array stored in the cache
pub fn serialize_index(photos: &[Photo]) -> serde_json::Result<String> {
    let persisted: Vec<PersistedPhoto<'_>> = photos
        .iter()
        .map(|photo| PersistedPhoto {
            filepath: &photo.filepath,
            web_view_path: &photo.web_view_path,
        })
        .collect();
    serde_json::to_string(&persisted)
}

/// Decode a cached index
///
/// Absent, `null` and malformed values all yield an empty index. Inside a
/// readable array, records that cannot be decoded are dropped one by one.
pub fn parse_index(value: Option<&str>) -> Vec<Photo> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Vec::new();
    };

    let records = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(value) {
        Ok(records) => records.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable photo index");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value::<Photo>(record) {
            Ok(photo) => Some(photo.without_payload()),
            Err(e) => {
                warn!(position, error = %e, "Skipping unreadable photo record");
                None
            }
        })
        .collect()
}
