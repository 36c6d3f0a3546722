//! Local media assets and the upload result a media message references.
//!
//! Encryption and the upload itself belong to the messaging client; this module
//! only reads the file, picks a MIME type and describes what came back.

use std::path::{Path, PathBuf};

/// Payloads above this size get an advisory warning; they are still sent.
pub const ADVISORY_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Default image MIME type when the extension is not recognized.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Kind of media being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
}

#[cfg(feature = "full")]
impl From<MediaType> for whatsapp_rust::download::MediaType {
    fn from(kind: MediaType) -> Self {
        match kind {
            MediaType::Image => Self::Image,
        }
    }
}

/// Image MIME type from the file extension. Unknown extensions fall back to JPEG;
/// nothing is rejected here.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// A local file read once for upload.
#[derive(Debug)]
pub struct MediaAsset {
    pub path: PathBuf,
    pub data: Vec<u8>,
    pub mimetype: &'static str,
}

impl MediaAsset {
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
            mimetype: mime_for_path(path),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn exceeds_advisory_size(&self) -> bool {
        self.len() > ADVISORY_MAX_BYTES
    }

    /// Size warning for oversized payloads, `None` when within the advisory limit.
    pub fn size_advisory(&self) -> Option<String> {
        self.exceeds_advisory_size().then(|| {
            format!(
                "Image size is {} MB, which may be too large. Consider reducing to under 5MB for better compatibility.",
                self.len() / (1024 * 1024)
            )
        })
    }
}

/// What the media server returned for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub url: String,
    pub direct_path: String,
    pub media_key: Vec<u8>,
    pub file_sha256: Vec<u8>,
    pub file_enc_sha256: Vec<u8>,
    pub file_length: u64,
}
