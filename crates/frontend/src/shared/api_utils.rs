//! API utilities for frontend-backend communication
//!
//! Resolves the backend origin the REST transport sends requests to.

use console_core::config::ApiConfig;

/// Get the base URL for API requests
///
/// Uses `api.base_url` when configured. Otherwise the URL is built from the
/// current window location with the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(api: &ApiConfig) -> String {
    if let Some(base) = api.base_url.as_deref().filter(|b| !b.trim().is_empty()) {
        return base.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// TOML configuration embedded by the host page, if any.
///
/// Looked up as the text of `<script id="console-config" type="application/toml">`.
pub fn host_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id("console-config")?;
    element.text_content().filter(|t| !t.trim().is_empty())
}
