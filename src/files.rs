//! アップロードファイルの読み込み

use crate::error::{AdminError, Result};
use lifeline_admin_common::Attachment;
use std::path::Path;

const MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
    ("avif", "image/avif"),
];

/// 拡張子からMIMEタイプを推定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}

/// ファイルを読み込んで添付ファイルにする
pub fn load_attachment(path: &Path) -> Result<Attachment> {
    if !path.is_file() {
        return Err(AdminError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    tracing::debug!(file = %path.display(), size = bytes.len(), "Loaded attachment");
    Ok(Attachment::new(file_name, mime_type_for(path), bytes))
}
