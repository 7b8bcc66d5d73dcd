//! File-upload descriptor and platform upload limit.
//!
//! The validator never touches upload storage itself; file rules only read
//! the descriptor the web layer hands over: the upload's error state, its
//! size, and the media type and filename declared by the client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default platform upload limit: 2 MiB.
pub const DEFAULT_UPLOAD_LIMIT: u64 = 2 * 1024 * 1024;

/// Outcome reported by the upload layer for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// Upload completed without error
    Ok,
    /// File exceeded the form-declared size limit
    ExceedsFormLimit,
    /// File exceeded the platform-configured size limit
    ExceedsPlatformLimit,
    /// Any other upload failure (partial write, missing temp dir, ...)
    Failed,
}

/// Read-only view of one uploaded file.
///
/// `media_type` and `filename` are client-declared and therefore
/// untrusted; the `extension` rule cross-checks them against a fixed
/// extension-to-MIME table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    status: UploadStatus,
    size: u64,
    media_type: String,
    filename: String,
}

impl UploadedFile {
    /// Creates a new upload descriptor.
    pub fn new(
        status: UploadStatus,
        size: u64,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            status,
            size,
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Returns the upload error state.
    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Returns the file size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the client-declared media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the client-declared filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the lowercased extension of the declared filename, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.filename.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Returns true if the descriptor represents a completed upload.
    pub fn is_ok(&self) -> bool {
        self.status == UploadStatus::Ok
    }
}

/// Returns the canonical MIME type for a known image extension.
///
/// The `extension` rule uses this table to verify the client-declared
/// media type.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "jpeg" | "jpg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "svg" => Some("image/svg+xml"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Error returned when a size-limit string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid upload size limit: '{0}'")]
pub struct ParseLimitError(pub String);

/// Parses a platform size-limit string into bytes.
///
/// Accepts a bare integer or an integer with a `K`/`M`/`G`/`T`/`P`
/// suffix, interpreted as powers of 1024. This mirrors how platforms
/// express their upload limits in configuration (e.g. `"2M"`).
pub fn parse_upload_limit(text: &str) -> Result<u64, ParseLimitError> {
    let text = text.trim();
    let (digits, shift) = match text.chars().last() {
        Some(suffix) if suffix.is_ascii_alphabetic() => {
            let shift = match suffix.to_ascii_uppercase() {
                'K' => 10,
                'M' => 20,
                'G' => 30,
                'T' => 40,
                'P' => 50,
                _ => return Err(ParseLimitError(text.to_string())),
            };
            (&text[..text.len() - 1], shift)
        }
        _ => (text, 0u32),
    };

    let base: u64 = digits
        .trim()
        .parse()
        .map_err(|_| ParseLimitError(text.to_string()))?;

    base.checked_mul(1u64 << shift)
        .ok_or_else(|| ParseLimitError(text.to_string()))
}
