// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the local filesystem hosts

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use photo_registry::backends::{
    CameraBackend, Capabilities, CaptureOptions, Directory, FileCamera, FileStorage,
    JsonFileStore, KeyValueStore, LocalFileStorage, PlatformMode, StaticPlatform,
};
use photo_registry::errors::{CameraError, StorageError};
use photo_registry::{PhotoRegistry, RegistryOptions};
use std::sync::Arc;
use tempfile::tempdir;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

#[tokio::test]
async fn test_local_storage_write_read_delete() {
    let dir = tempdir().unwrap();
    let storage = LocalFileStorage::new(dir.path().join("data"), dir.path().join("cache"));

    let saved = storage
        .write("1.jpeg", "data:image/jpeg;base64,aGVsbG8=", Directory::Data)
        .await
        .unwrap();
    assert!(saved.uri.starts_with("file://"));
    assert!(saved.uri.ends_with("/data/1.jpeg"));
    assert_eq!(
        std::fs::read(dir.path().join("data/1.jpeg")).unwrap(),
        b"hello"
    );

    let by_name = storage.read("1.jpeg", Some(Directory::Data)).await.unwrap();
    assert_eq!(by_name.data, "aGVsbG8=");
    let by_uri = storage.read(&saved.uri, None).await.unwrap();
    assert_eq!(by_uri, by_name);

    storage.delete("1.jpeg", Directory::Data).await.unwrap();
    assert!(!dir.path().join("data/1.jpeg").exists());
}

#[tokio::test]
async fn test_local_storage_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let storage = LocalFileStorage::new(dir.path().join("data"), dir.path().join("cache"));

    let err = storage.delete("nope.jpeg", Directory::Data).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    let err = storage
        .read("nope.jpeg", Some(Directory::Cache))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn test_local_storage_rejects_paths_escaping_directory() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(dir.path().join("outside.jpeg"), b"secret").unwrap();
    let storage = LocalFileStorage::new(dir.path().join("data"), dir.path().join("cache"));

    let outside = dir.path().join("outside.jpeg");
    let outside_uri = format!("file://{}", outside.display());
    for path in [
        "../outside.jpeg",
        outside.to_str().unwrap(),
        outside_uri.as_str(),
    ] {
        let err = storage.read(path, Some(Directory::Data)).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)), "{path}");

        let err = storage.delete(path, Directory::Data).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)), "{path}");
    }

    let err = storage
        .write("../planted.jpeg", "aGVsbG8=", Directory::Data)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidPath(_)));
    assert!(!dir.path().join("planted.jpeg").exists());
    assert_eq!(std::fs::read(&outside).unwrap(), b"secret");

    // Absolute URIs are still readable when no directory is given
    let by_uri = storage.read(&outside_uri, None).await.unwrap();
    assert_eq!(by_uri.data, BASE64_STANDARD.encode(b"secret"));
}

#[tokio::test]
async fn test_json_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs/preferences.json");

    let store = JsonFileStore::new(&path);
    assert_eq!(store.get("photos").await.unwrap(), None);
    store.set("photos", "[]").await.unwrap();
    store.set("other", "1").await.unwrap();
    store.remove("other").await.unwrap();

    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.get("photos").await.unwrap().as_deref(), Some("[]"));
    assert_eq!(reopened.get("other").await.unwrap(), None);
}

#[tokio::test]
async fn test_json_store_rejects_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{oops").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(store.get("photos").await.is_err());
}

#[tokio::test]
async fn test_file_camera_stages_copy_and_serves_preview() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("shot.png");
    std::fs::write(&source, PNG_BYTES).unwrap();

    let camera = FileCamera::new(&source, dir.path().join("tmp"));
    let captured = camera.get_photo(&CaptureOptions::default()).await.unwrap();

    assert_eq!(captured.format, "png");
    let web_path = captured.web_path.clone().unwrap();
    assert_eq!(captured.path.as_deref(), Some(web_path.as_str()));
    assert!(web_path.contains("/tmp/"));

    let blob = camera.fetch_web_path(&web_path).await.unwrap();
    assert_eq!(blob.mime, "image/png");
    assert_eq!(blob.bytes, PNG_BYTES);

    camera.release(&captured).await.unwrap();
    assert_eq!(std::fs::read_dir(dir.path().join("tmp")).unwrap().count(), 0);
    assert!(source.exists());
    // Second release is a no-op
    camera.release(&captured).await.unwrap();
}

#[tokio::test]
async fn test_file_camera_missing_source_fails() {
    let dir = tempdir().unwrap();
    let camera = FileCamera::new(dir.path().join("absent.jpg"), dir.path().join("tmp"));

    let err = camera
        .get_photo(&CaptureOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CameraError::CaptureFailed(_)));
}

fn local_capabilities(root: &std::path::Path, source: &std::path::Path, mode: PlatformMode) -> Capabilities {
    Capabilities {
        camera: Arc::new(FileCamera::new(source, root.join("cache"))),
        storage: Arc::new(LocalFileStorage::new(root.join("data"), root.join("cache"))),
        preferences: Arc::new(JsonFileStore::new(root.join("preferences.json"))),
        platform: Arc::new(StaticPlatform::new(mode)),
    }
}

#[tokio::test]
async fn test_browser_registry_on_local_hosts() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("shot.jpg");
    std::fs::write(&source, b"\xff\xd8\xff\xe0jpeg-ish").unwrap();

    let mut registry = PhotoRegistry::new(
        local_capabilities(dir.path(), &source, PlatformMode::Browser),
        RegistryOptions::default(),
    );
    let photo = registry.capture_and_store().await.unwrap();
    registry.flush().await;
    drop(registry);

    let mut reloaded = PhotoRegistry::new(
        local_capabilities(dir.path(), &source, PlatformMode::Browser),
        RegistryOptions::default(),
    );
    reloaded.load_persisted().await.unwrap();

    let expected = format!(
        "data:image/jpeg;base64,{}",
        BASE64_STANDARD.encode(b"\xff\xd8\xff\xe0jpeg-ish")
    );
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.photos()[0].filepath, photo.filepath);
    assert_eq!(reloaded.photos()[0].web_view_path, expected);

    reloaded.delete_at(0).await.unwrap();
    reloaded.flush().await;
    assert!(!dir.path().join("data").join(&photo.filepath).exists());
}

#[tokio::test]
async fn test_embedded_registry_on_local_hosts() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("shot.jpg");
    std::fs::write(&source, b"\xff\xd8\xff\xe0native").unwrap();

    let mut registry = PhotoRegistry::new(
        local_capabilities(dir.path(), &source, PlatformMode::EmbeddedNative),
        RegistryOptions::default(),
    );
    let photo = registry.capture_and_store().await.unwrap();
    registry.flush().await;

    let stored = photo.filepath.trim_start_matches("file://");
    assert_eq!(std::fs::read(stored).unwrap(), b"\xff\xd8\xff\xe0native");
    // Staged camera copy is gone once stored
    assert_eq!(std::fs::read_dir(dir.path().join("cache")).unwrap().count(), 0);
    assert!(
        photo
            .web_view_path
            .starts_with("http://localhost/_capacitor_file_/")
    );

    registry.delete_at(0).await.unwrap();
    registry.flush().await;
    assert!(!std::path::Path::new(stored).exists());
    assert!(registry.is_empty());
}
