//! Screenshot persistence and encoding

use base64::Engine;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{ComputerError, Resolution, Result};

/// Writes screenshots as PNG files under one directory
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl ScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A fresh `screenshot_<hex>.png` path
    pub fn next_path(&self) -> PathBuf {
        self.dir
            .join(format!("screenshot_{:032x}.png", rand::random::<u128>()))
    }

    /// Resize when needed, write as PNG, and return the written path
    pub async fn persist(&self, image: RgbaImage, size: Resolution) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ComputerError::capture(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.next_path();

        let target = path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let image = if image.dimensions() != (size.width, size.height) {
                imageops::resize(&image, size.width, size.height, FilterType::CatmullRom)
            } else {
                image
            };
            image
                .save_with_format(&target, ImageFormat::Png)
                .map_err(|e| {
                    ComputerError::capture(format!("Failed to write {}: {}", target.display(), e))
                })
        })
        .await
        .map_err(|e| ComputerError::capture(format!("Screenshot writer failed: {}", e)))??;

        info!(path = %path.display(), %size, "screenshot written");
        Ok(path)
    }

    /// Read a persisted screenshot back as standard base64
    pub async fn encode(&self, path: &Path) -> Result<String> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ComputerError::capture("Failed to take screenshot"));
        }
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ComputerError::capture(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}
