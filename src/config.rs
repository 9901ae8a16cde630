//! Runtime Configuration
//!
//! Read once at startup from `window.__MAV_CONFIG__`, falling back to the
//! compile-time `MAV_API_URL` and then `/api`.

use leptos::prelude::*;
use serde::Deserialize;
use wasm_bindgen::JsValue;

const DEFAULT_API_BASE: &str = "/api";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub public_page_size: usize,
    pub admin_page_size: usize,
    pub file_page_size: usize,
    pub excerpt_chars: usize,
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("MAV_API_URL").unwrap_or(DEFAULT_API_BASE).to_string(),
            public_page_size: 12,
            admin_page_size: 10,
            file_page_size: 10,
            excerpt_chars: 80,
            log_capacity: 200,
        }
    }
}

impl AppConfig {
    /// Config injected by the hosting page, or defaults.
    pub fn load() -> Self {
        let injected = web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__MAV_CONFIG__")).ok())
            .filter(|v| !v.is_undefined() && !v.is_null());

        let config = match injected {
            Some(value) => match serde_wasm_bindgen::from_value::<AppConfig>(value) {
                Ok(config) => config,
                Err(e) => {
                    web_sys::console::warn_1(&format!("[CONFIG] ignoring __MAV_CONFIG__: {}", e).into());
                    AppConfig::default()
                }
            },
            None => AppConfig::default(),
        };
        config.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() { DEFAULT_API_BASE.to_string() } else { trimmed.to_string() };
        for size in [
            &mut self.public_page_size,
            &mut self.admin_page_size,
            &mut self.file_page_size,
        ] {
            *size = (*size).max(1);
        }
        self
    }
}

pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"api_base_url": "http://localhost:8000/"}"#).unwrap();
        let config = config.normalized();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.public_page_size, 12);
        assert_eq!(config.admin_page_size, 10);
    }

    #[test]
    fn test_normalize_rejects_zero_page_size_and_blank_base() {
        let config = AppConfig {
            api_base_url: "  ".into(),
            file_page_size: 0,
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.file_page_size, 1);
    }
}
