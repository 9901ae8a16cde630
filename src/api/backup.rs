//! Backup Endpoints

use regex::Regex;
use std::sync::OnceLock;
use crate::models::BackupInfo;
use super::{file_form, ApiClient, ApiError};

pub const DEFAULT_BACKUP_FILENAME: &str = "mav_backup.zip";

static FILENAME_RE: OnceLock<Regex> = OnceLock::new();

/// A downloaded archive
pub struct BackupArchive {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub async fn backup_info(&self) -> Result<BackupInfo, ApiError> {
        self.get_json("/backup/info").await
    }

    pub async fn download_backup(&self) -> Result<BackupArchive, ApiError> {
        let response = self.get_raw("/backup/download").await?;
        let filename = response
            .headers()
            .get("content-disposition")
            .as_deref()
            .and_then(parse_content_disposition)
            .unwrap_or_else(|| DEFAULT_BACKUP_FILENAME.to_string());
        let bytes = response.binary().await?;
        Ok(BackupArchive { filename, bytes })
    }

    pub async fn restore_backup(&self, file: &web_sys::File) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_form("/backup/restore", file_form("file", file)?).await?;
        Ok(())
    }
}

/// Filename from a `Content-Disposition` header
pub fn parse_content_disposition(header: &str) -> Option<String> {
    FILENAME_RE
        .get_or_init(|| Regex::new(r#"filename="?([^";\s]+)"?"#).expect("filename pattern is valid"))
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('"', ""))
        .filter(|name| !name.is_empty())
}

/// Only zip archives can be restored
pub fn is_restorable(filename: &str) -> bool {
    filename.ends_with(".zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_disposition() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="mav_backup_20250101.zip""#).as_deref(),
            Some("mav_backup_20250101.zip")
        );
        assert_eq!(
            parse_content_disposition("attachment; filename=backup.zip").as_deref(),
            Some("backup.zip")
        );
        assert_eq!(parse_content_disposition("attachment"), None);
    }

    #[test]
    fn test_only_zip_is_restorable() {
        assert!(is_restorable("mav_backup.zip"));
        assert!(!is_restorable("mav_backup.tar.gz"));
    }
}
