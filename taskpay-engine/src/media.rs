//! Image handling for completion photos and withdrawal receipts
//!
//! Incoming images are validated, re-encoded to JPEG and stored under a
//! content-addressed filename. The store boundary fails open: when the
//! image store is unreachable the caller gets an inline base64 fallback
//! instead of an error, so an outage never blocks a task submission or a
//! payout.

use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use sha2::{Digest, Sha256};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::ImageRef;
use thiserror::Error;

/// Maximum accepted upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

/// Media errors
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("File too large: {0} bytes (max {MAX_FILE_SIZE})")]
    TooLarge(usize),

    #[error("Invalid image file: {0}")]
    Invalid(String),

    #[error("Image processing failed: {0}")]
    Processing(String),

    #[error("File storage failed: {0}")]
    Store(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        let code = match &err {
            MediaError::TooLarge(_) => ErrorCode::FileTooLarge,
            MediaError::Invalid(_) => ErrorCode::InvalidImageFile,
            MediaError::Processing(_) => ErrorCode::ImageProcessingFailed,
            MediaError::Store(_) => ErrorCode::FileStorageFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate and re-encode an image as JPEG
///
/// Returns the JPEG bytes and a content-addressed filename, so identical
/// uploads dedupe naturally.
pub fn process_image(data: &[u8]) -> Result<(Vec<u8>, String), MediaError> {
    if data.is_empty() {
        return Err(MediaError::Invalid("empty file".to_string()));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(MediaError::TooLarge(data.len()));
    }

    let img = image::load_from_memory(data).map_err(|e| MediaError::Invalid(e.to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    img.write_with_encoder(encoder)
        .map_err(|e| MediaError::Processing(e.to_string()))?;

    let jpeg = buf.into_inner();
    let filename = format!("{}.jpg", calculate_hash(&jpeg));
    Ok((jpeg, filename))
}

/// Image store contract
///
/// `upload` returns a URL-like reference to the stored object.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, bucket: &str, filename: &str, data: &[u8]) -> Result<String, MediaError>;
}

/// Directory-backed image store
pub struct DirImageStore {
    root: PathBuf,
}

impl DirImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ImageStore for DirImageStore {
    async fn upload(&self, bucket: &str, filename: &str, data: &[u8]) -> Result<String, MediaError> {
        let dir = self.root.join(bucket);
        std::fs::create_dir_all(&dir).map_err(|e| MediaError::Store(e.to_string()))?;

        let path = dir.join(filename);
        // Content-addressed: an existing file with this name is the same image
        if !path.exists() {
            std::fs::write(&path, data).map_err(|e| MediaError::Store(e.to_string()))?;
        }
        Ok(path.to_string_lossy().into_owned())
    }
}

/// Process an image and store it, degrading to an inline reference
///
/// Invalid input is still a hard (caller) error; only store-side failures
/// fall back.
pub async fn store_image_fail_open(
    store: &dyn ImageStore,
    bucket: &str,
    data: &[u8],
) -> AppResult<ImageRef> {
    let (jpeg, filename) = process_image(data).map_err(AppError::from)?;

    match store.upload(bucket, &filename, &jpeg).await {
        Ok(url) => Ok(ImageRef::url(url)),
        Err(e) => {
            tracing::warn!(
                bucket,
                error = %e,
                "Image store unavailable, falling back to inline image"
            );
            Ok(ImageRef::inline_from_bytes(&jpeg))
        }
    }
}
