//! Photo attachment helpers.

use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing::debug;

/// Read the whole file to confirm it is readable. Returns its size.
pub async fn probe(path: &Path) -> AppResult<u64> {
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), size = bytes.len(), "photo selected");
    Ok(bytes.len() as u64)
}

/// MIME type from the file extension; unknown extensions are sent as raw bytes.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Build the multipart file part for `path`.
pub async fn load_part(path: &Path) -> AppResult<reqwest::multipart::Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo".to_string());

    reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))
        .map_err(|e| AppError::Other(format!("invalid attachment type: {}", e)))
}
