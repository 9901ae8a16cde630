//! API Errors

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired")]
    Unauthorized,
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// `detail` from a FastAPI style error body. Validation errors carry a list
/// of `{msg}` objects; their messages are joined.
pub fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("\n"))
        }
        _ => None,
    }
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status { status, detail: parse_detail(body) }
    }

    /// Message for the user: the server's detail verbatim when present.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            ApiError::Unauthorized => "セッションの有効期限が切れました。再度ログインしてください。".to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_status(400, r#"{"detail": "カテゴリ名は既に存在します"}"#);
        assert_eq!(err.user_message("保存に失敗しました"), "カテゴリ名は既に存在します");
    }

    #[test]
    fn test_validation_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}, {"msg": "too short"}]}"#;
        assert_eq!(parse_detail(body).as_deref(), Some("field required\ntoo short"));
    }

    #[test]
    fn test_missing_detail_uses_fallback() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err, ApiError::Status { status: 500, detail: None });
        assert_eq!(err.user_message("保存に失敗しました"), "保存に失敗しました");
        assert_eq!(ApiError::Network("x".into()).user_message("fb"), "fb");
    }
}
