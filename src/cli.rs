// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for registry operations
//!
//! This module provides command-line functionality for:
//! - Capturing a photo from an image file
//! - Listing stored photos
//! - Deleting a stored photo

use photo_registry::backends::{
    Capabilities, FileCamera, JsonFileStore, LocalFileStorage, StaticPlatform,
};
use photo_registry::{Config, Photo, PhotoRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Capture `image` into the registry
pub fn capture(config: &Config, image: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let photo = rt.block_on(async {
        let mut registry = open_registry(config, &image);
        registry.load_persisted().await?;
        let photo = registry.capture_and_store().await?;
        registry.flush().await;
        Ok::<_, photo_registry::AppError>(photo)
    })?;

    println!("Photo stored: {}", photo.filepath);
    println!("  View: {}", preview(&photo.web_view_path));
    Ok(())
}

/// List stored photos, newest first
pub fn list(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let photos = rt.block_on(async {
        let mut registry = open_registry(config, Path::new(""));
        registry.load_persisted().await?;
        Ok::<_, photo_registry::AppError>(registry.photos().to_vec())
    })?;

    if photos.is_empty() {
        println!("No photos stored.");
        return Ok(());
    }

    println!("Stored photos ({} mode):", config.platform);
    println!();
    for (index, photo) in photos.iter().enumerate() {
        print_photo(index, photo);
    }

    Ok(())
}

/// Delete the photo at `index`
pub fn delete(config: &Config, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let removed = rt.block_on(async {
        let mut registry = open_registry(config, Path::new(""));
        registry.load_persisted().await?;
        let removed = registry.delete_at(index).await;
        registry.flush().await;
        removed
    })?;

    println!("Photo deleted: {}", removed.filepath);
    Ok(())
}

/// Build a registry over the local filesystem hosts
fn open_registry(config: &Config, image: &Path) -> PhotoRegistry {
    let capabilities = Capabilities {
        camera: Arc::new(FileCamera::new(image, config.cache_dir())),
        storage: Arc::new(LocalFileStorage::new(
            config.data_dir(),
            config.cache_dir(),
        )),
        preferences: Arc::new(JsonFileStore::new(config.preferences_path())),
        platform: Arc::new(StaticPlatform::with_origin(
            config.platform,
            config.local_origin.clone(),
        )),
    };

    PhotoRegistry::new(capabilities, config.registry_options())
}

fn print_photo(index: usize, photo: &Photo) {
    println!("  [{}] {}", index, photo.filepath);
    println!("      View: {}", preview(&photo.web_view_path));
}

/// Shorten inline data URIs for display
fn preview(web_view_path: &str) -> String {
    const MAX_LEN: usize = 72;
    if !web_view_path.starts_with("data:") || web_view_path.chars().count() <= MAX_LEN {
        return web_view_path.to_string();
    }

    let head: String = web_view_path.chars().take(MAX_LEN).collect();
    format!("{}... ({} bytes)", head, web_view_path.len())
}
