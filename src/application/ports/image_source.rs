//! Image source port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::ImageData;

/// Image loading errors
#[derive(Debug, Clone, Error)]
pub enum ImageError {
    #[error("Failed to read image {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Unsupported image format: {0}")]
    Unsupported(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to convert HEIC image: {0}")]
    ConversionFailed(String),

    #[error("Failed to encode JPEG: {0}")]
    EncodeFailed(String),
}

/// Port for reading photos from disk
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// SHA-256 of the raw file bytes, hex encoded
    async fn fingerprint(&self, path: &Path) -> Result<String, ImageError>;

    /// Decode, downscale and re-encode the photo as JPEG
    async fn load_jpeg(&self, path: &Path) -> Result<ImageData, ImageError>;
}
