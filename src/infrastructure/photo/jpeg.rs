//! Photo loading adapter: decode, downscale, re-encode as JPEG

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::application::ports::{ImageError, ImageSource};
use crate::domain::transcription::ImageData;

/// Longest side of the image sent to the model
pub const MAX_SIDE: u32 = 1800;

/// JPEG encoder quality
pub const JPEG_QUALITY: u8 = 92;

/// Image source reading from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct JpegImageSource;

impl JpegImageSource {
    pub fn new() -> Self {
        Self
    }
}

async fn read(path: &Path) -> Result<Vec<u8>, ImageError> {
    fs::read(path).await.map_err(|e| ImageError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn is_heic(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("heic"))
}

/// Convert a HEIC file with the macOS `sips` tool and return the JPEG bytes
fn convert_heic(path: &Path) -> Result<Vec<u8>, ImageError> {
    let out = heic_temp_path(path);

    let status = Command::new("sips")
        .args(["-s", "format", "jpeg"])
        .arg(path)
        .arg("--out")
        .arg(&out)
        .status()
        .map_err(|e| ImageError::ConversionFailed(format!("sips not available: {}", e)))?;

    if !status.success() {
        let _ = std::fs::remove_file(&out);
        return Err(ImageError::ConversionFailed(format!(
            "sips exited with {}",
            status
        )));
    }

    let bytes = std::fs::read(&out).map_err(|e| ImageError::ReadFailed {
        path: out.display().to_string(),
        message: e.to_string(),
    });
    let _ = std::fs::remove_file(&out);
    bytes
}

fn heic_temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    std::env::temp_dir().join(format!(
        "notes-to-notion-{}-{}.jpg",
        std::process::id(),
        stem
    ))
}

/// Shrink so that the longest side is at most `MAX_SIDE`, keeping aspect ratio
fn downscale(image: DynamicImage) -> DynamicImage {
    if image.width().max(image.height()) <= MAX_SIDE {
        return image;
    }
    image.resize(MAX_SIDE, MAX_SIDE, FilterType::Lanczos3)
}

/// Decode any supported format and re-encode it as JPEG
pub fn to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ImageError::DecodeFailed(e.to_string()))?;
    let rgb = downscale(image).to_rgb8();

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// SHA-256 of `bytes`, hex encoded
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[async_trait]
impl ImageSource for JpegImageSource {
    async fn fingerprint(&self, path: &Path) -> Result<String, ImageError> {
        let bytes = read(path).await?;
        Ok(fingerprint_bytes(&bytes))
    }

    async fn load_jpeg(&self, path: &Path) -> Result<ImageData, ImageError> {
        let path = path.to_path_buf();
        let bytes = if is_heic(&path) {
            None
        } else {
            Some(read(&path).await?)
        };

        // Decoding and resampling are CPU bound
        let jpeg = tokio::task::spawn_blocking(move || {
            let source = match bytes {
                Some(bytes) => bytes,
                None => convert_heic(&path)?,
            };
            to_jpeg(&source)
        })
        .await
        .map_err(|e| ImageError::DecodeFailed(format!("Task join error: {}", e)))??;

        Ok(ImageData::jpeg(jpeg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn dimensions(jpeg: &[u8]) -> (u32, u32) {
        let image = image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg).unwrap();
        (image.width(), image.height())
    }

    #[test]
    fn large_image_is_resized_to_max_side() {
        let jpeg = to_jpeg(&png(2400, 1200)).unwrap();
        assert_eq!(dimensions(&jpeg), (1800, 900));
    }

    #[test]
    fn small_image_keeps_size() {
        let jpeg = to_jpeg(&png(1200, 800)).unwrap();
        assert_eq!(dimensions(&jpeg), (1200, 800));
    }

    #[test]
    fn output_is_jpeg() {
        let jpeg = to_jpeg(&png(10, 10)).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            to_jpeg(b"not an image"),
            Err(ImageError::DecodeFailed(_))
        ));
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn heic_detection_is_case_insensitive() {
        assert!(is_heic(Path::new("IMG_1.HEIC")));
        assert!(is_heic(Path::new("a.heic")));
        assert!(!is_heic(Path::new("a.jpg")));
    }

    #[tokio::test]
    async fn load_jpeg_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.png");
        std::fs::write(&path, png(40, 20)).unwrap();

        let source = JpegImageSource::new();
        let image = source.load_jpeg(&path).await.unwrap();

        assert_eq!(image.mime_type().as_str(), "image/jpeg");
        assert_eq!(dimensions(image.data()), (40, 20));
        assert_eq!(source.fingerprint(&path).await.unwrap().len(), 64);
    }
}
