//! Form Validation
//!
//! Checks done before a request is sent.

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    Mismatch,
    TooShort,
}

impl PasswordError {
    pub fn message(self) -> &'static str {
        match self {
            PasswordError::Mismatch => "パスワードが一致しません",
            PasswordError::TooShort => "パスワードは6文字以上で入力してください",
        }
    }
}

/// New password and its confirmation must match and be long enough.
/// Length counts characters, not bytes.
pub fn check_new_password(password: &str, confirm: &str) -> Result<(), PasswordError> {
    if password != confirm {
        return Err(PasswordError::Mismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

pub const MAX_AVATAR_BYTES: f64 = 10.0 * 1024.0 * 1024.0;
const AVATAR_TYPES: [&str; 5] = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarError {
    TooLarge,
    UnsupportedType,
}

impl AvatarError {
    pub fn message(self) -> &'static str {
        match self {
            AvatarError::TooLarge => "ファイルサイズが大きすぎます。10MB以下のファイルを選択してください。",
            AvatarError::UnsupportedType => "サポートされていない画像形式です。JPEG、PNG、GIF、WebP形式を使用してください。",
        }
    }
}

/// Avatar candidates: at most 10MB of JPEG, PNG, GIF or WebP.
pub fn check_avatar_file(size: f64, mime_type: &str) -> Result<(), AvatarError> {
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge);
    }
    if !AVATAR_TYPES.contains(&mime_type) {
        return Err(AvatarError::UnsupportedType);
    }
    Ok(())
}

/// Required text field after trimming
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_is_reported_first() {
        assert_eq!(check_new_password("abc", "abd"), Err(PasswordError::Mismatch));
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(check_new_password("12345", "12345"), Err(PasswordError::TooShort));
        assert_eq!(check_new_password("123456", "123456"), Ok(()));
        assert_eq!(check_new_password("あいうえおか", "あいうえおか"), Ok(()));
    }

    #[test]
    fn test_avatar_file() {
        assert_eq!(check_avatar_file(1024.0, "image/png"), Ok(()));
        assert_eq!(check_avatar_file(MAX_AVATAR_BYTES, "image/webp"), Ok(()));
        assert_eq!(check_avatar_file(MAX_AVATAR_BYTES + 1.0, "image/png"), Err(AvatarError::TooLarge));
        assert_eq!(check_avatar_file(10.0, "image/svg+xml"), Err(AvatarError::UnsupportedType));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  news "), Some("news".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}
