//! Browser URL Sync
//!
//! `/content/{id}` selects an article, anything else is the list.

use regex::Regex;
use std::sync::OnceLock;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

static CONTENT_PATH_RE: OnceLock<Regex> = OnceLock::new();

fn content_path_re() -> &'static Regex {
    CONTENT_PATH_RE.get_or_init(|| Regex::new(r"/content/(\d+)").expect("content path pattern is valid"))
}

/// Selected content id encoded in `path`, if any
pub fn parse_content_id(path: &str) -> Option<u32> {
    content_path_re()
        .captures(path)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Path that encodes `selected`
pub fn content_path(selected: Option<u32>) -> String {
    match selected {
        Some(id) => format!("/content/{}", id),
        None => "/".to_string(),
    }
}

// ========================
// Browser Bindings
// ========================

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Push a history entry for `selected` unless the URL already matches.
pub fn push_url(selected: Option<u32>) {
    let path = content_path(selected);
    if current_path() == path {
        return;
    }
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&path)) {
        log::warn!("[NAV] pushState failed: {:?}", e);
    }
}

/// Call `on_change` with the content id of the new path on back/forward.
pub fn bind_popstate<F>(on_change: F)
where
    F: Fn(Option<u32>) + 'static,
{
    let handler = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_ev: web_sys::PopStateEvent| {
        on_change(parse_content_id(&current_path()));
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
    }
    handler.forget();
}

pub fn scroll_to_top() {
    if let Some(win) = web_sys::window() {
        win.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_id() {
        assert_eq!(parse_content_id("/content/42"), Some(42));
        assert_eq!(parse_content_id("/"), None);
        assert_eq!(parse_content_id("/content/"), None);
        assert_eq!(parse_content_id("/content/abc"), None);
        assert_eq!(parse_content_id("/content/99999999999"), None);
    }

    #[test]
    fn test_content_path() {
        assert_eq!(content_path(Some(7)), "/content/7");
        assert_eq!(content_path(None), "/");
        assert_eq!(parse_content_id(&content_path(Some(7))), Some(7));
    }
}
