//! Session Token
//!
//! Bearer token persisted in `localStorage`.

const TOKEN_KEY: &str = "token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn token() -> Option<String> {
    storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.is_empty())
}

pub fn set_token(token: &str) {
    if let Some(s) = storage() {
        if s.set_item(TOKEN_KEY, token).is_err() {
            log::warn!("[SESSION] could not persist token");
        }
    }
}

pub fn clear_token() {
    if let Some(s) = storage() {
        let _ = s.remove_item(TOKEN_KEY);
    }
}

/// `Authorization` header value for the stored token
pub fn bearer() -> Option<String> {
    token().map(|t| format!("Bearer {}", t))
}
