#![allow(warnings)]
//! Mav Web Frontend Entry Point

mod models;
mod api;
mod config;
mod session;
mod context;
mod store;
mod navigation;
mod view_state;
mod pagination;
mod thumbnail;
mod markdown;
mod reorder;
mod timezone;
mod validation;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use rolling_logger::RollingLogger;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

/// `window.__MAV_LOGS__()` returns the retained log lines, for bug reports
/// from the browser console.
fn expose_log_buffer(logger: &'static RollingLogger) {
    let Some(window) = web_sys::window() else { return; };
    let dump = Closure::<dyn Fn() -> String>::new(move || logger.dump());
    match js_sys::Reflect::set(&window, &JsValue::from_str("__MAV_LOGS__"), dump.as_ref()) {
        Ok(_) => dump.forget(),
        Err(e) => log::warn!("[APP] log accessor unavailable: {:?}", e),
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let config = config::AppConfig::load();
    match rolling_logger::init(config.log_capacity, log::LevelFilter::Info) {
        Ok(logger) => expose_log_buffer(logger),
        Err(e) => web_sys::console::warn_1(&format!("[APP] logger already installed: {}", e).into()),
    }
    mount_to_body(App);
}
