//! Frontend Models
//!
//! Data structures matching the REST API payloads.

use serde::{Deserialize, Serialize};

/// Published or draft article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: u32,
    pub title: String,
    /// Markdown body
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "管理者",
            Role::Member => "メンバー",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

/// Signed-in user as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default = "default_timezone")]
    pub timezone: u32,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn default_timezone() -> u32 {
    1
}

/// User row in the admin user list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: u32,
    pub filename: String,
    pub original_filename: String,
    pub file_size: u64,
    pub mime_type: String,
    pub url: String,
    pub created_at: String,
    #[serde(default)]
    pub uploader: Option<String>,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub original_filename: String,
    pub url: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AvatarInfo {
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackupInfo {
    pub database: DatabaseCounts,
    pub files: FileStats,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseCounts {
    pub users: u64,
    pub categories: u64,
    pub contents: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileStats {
    pub count: u64,
    pub total_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetupStatus {
    pub needs_setup: bool,
}

// ========================
// Request Payloads
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct ContentPayload {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub category_ids: Vec<u32>,
    pub is_published: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SortOrderEntry {
    pub id: u32,
    pub sort_order: i32,
}

/// Username and email are only sent when they changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub profile: Option<String>,
    pub timezone: u32,
}

impl ProfileUpdate {
    pub fn from_edit(current: &User, username: &str, email: &str, profile: &str, timezone: u32) -> Self {
        let changed = |new: &str, old: Option<&str>| (Some(new) != old).then(|| new.to_string());
        Self {
            username: changed(username, Some(current.username.as_str())),
            email: changed(email, current.email.as_deref()),
            profile: (!profile.is_empty()).then(|| profile.to_string()),
            timezone,
        }
    }
}

/// `/auth/profile` answer; a changed email invalidates the old token
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdated {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_reads_body_from_content_field() {
        let json = r#"{
            "id": 3, "title": "t", "content": "![a](x.png) hi",
            "categories": ["news"], "is_published": true,
            "author_name": "kim", "created_at": "2025-08-25T12:00:00",
            "updated_at": "2025-08-25T12:00:00"
        }"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content.body, "![a](x.png) hi");
        assert_eq!(content.categories, vec!["news".to_string()]);
    }

    #[test]
    fn test_user_timezone_defaults_to_utc() {
        let json = r#"{"id": 1, "username": "a", "role": "member"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.timezone, 1);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_user_payload_omits_empty_password() {
        let payload = UserPayload {
            username: "u".into(),
            email: "u@example.com".into(),
            password: None,
            role: Role::Admin,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains(r#""role":"admin""#));
    }

    #[test]
    fn test_profile_update_sends_changed_identity_only() {
        let current = User {
            id: 1, username: "alice".into(), email: Some("a@example.com".into()),
            role: Role::Member, profile: None, timezone: 1,
        };
        let same = ProfileUpdate::from_edit(&current, "alice", "a@example.com", "", 13);
        assert_eq!(same.username, None);
        assert_eq!(same.email, None);
        assert_eq!(same.profile, None);
        assert_eq!(same.timezone, 13);

        let renamed = ProfileUpdate::from_edit(&current, "alicia", "b@example.com", "hi", 1);
        assert_eq!(renamed.username.as_deref(), Some("alicia"));
        assert_eq!(renamed.email.as_deref(), Some("b@example.com"));
        assert_eq!(renamed.profile.as_deref(), Some("hi"));
    }

    #[test]
    fn test_profile_response_with_token() {
        let json = r#"{"id": 1, "username": "a", "email": "x@y.z", "role": "admin", "profile": null, "timezone": 13, "access_token": "t"}"#;
        let parsed: ProfileUpdated = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user.timezone, 13);
        assert_eq!(parsed.access_token.as_deref(), Some("t"));
    }
}
