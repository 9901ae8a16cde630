//! Upload Endpoints
//!
//! Shared files plus the per-user avatar.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use crate::models::{AvatarInfo, UploadResult, UploadedFile};
use super::{file_form, ApiClient, ApiError};

#[derive(Debug, Clone, Deserialize)]
pub struct AvatarUpload {
    pub url: String,
}

impl ApiClient {
    pub async fn list_files(&self) -> Result<Vec<UploadedFile>, ApiError> {
        self.get_json("/uploads/").await
    }

    pub async fn upload_file(&self, file: &web_sys::File) -> Result<UploadResult, ApiError> {
        self.post_form("/uploads/upload", file_form("file", file)?).await
    }

    pub async fn delete_file(&self, filename: &str) -> Result<(), ApiError> {
        let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
        self.delete(&format!("/uploads/{}", encoded)).await
    }

    pub async fn avatar(&self, user_id: u32) -> Result<AvatarInfo, ApiError> {
        self.get_json(&format!("/uploads/avatar/{}", user_id)).await
    }

    pub async fn upload_avatar(&self, file: &web_sys::File) -> Result<AvatarUpload, ApiError> {
        self.post_form("/uploads/upload/avatar", file_form("file", file)?).await
    }

    pub async fn delete_avatar(&self) -> Result<(), ApiError> {
        self.delete("/uploads/avatar").await
    }
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable size with up to two decimals, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Markdown that embeds an uploaded image
pub fn markdown_image(alt: &str, url: &str) -> String {
    format!("![{}]({})", alt, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 123_456), "5.12 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_markdown_image() {
        assert_eq!(markdown_image("画像", "/uploads/a.png"), "![画像](/uploads/a.png)");
    }
}
