//! Asset storage for uploaded images

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Relative directory uploaded author images are stored under
const UPLOAD_DIR: &str = "uploads/author";

/// Image formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
        }
    }
}

/// Sniff the image format from its magic bytes.
/// Returns None for anything that is not a supported image.
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(ImageFormat::Webp)
    } else if bytes.starts_with(b"BM") {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}

/// Storage backend for uploaded assets
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store image bytes under a collision-free name and return the
    /// reference recorded on the owning resource. Rejects payloads that
    /// are not a supported image.
    async fn store(&self, bytes: &[u8]) -> AppResult<String>;
}

/// Stores assets on the local filesystem under the configured media root
#[derive(Clone)]
pub struct LocalAssetStore {
    media_root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(&self, bytes: &[u8]) -> AppResult<String> {
        let format = detect_image_format(bytes).ok_or_else(|| {
            AppError::Validation(
                "Upload a valid image. The file you uploaded was either not an image or a corrupted image".to_string(),
            )
        })?;

        let filename = format!("{}.{}", Uuid::new_v4(), format.extension());
        let dir = self.media_root.join(UPLOAD_DIR);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create media directory: {}", e)))?;

        tokio::fs::write(dir.join(&filename), bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store image: {}", e)))?;

        Ok(format!("{}/{}", UPLOAD_DIR, filename))
    }
}
