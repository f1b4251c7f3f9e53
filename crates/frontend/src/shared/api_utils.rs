//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// The API is served from the same origin as the application (share links are
/// opened on the API host itself).
///
/// # Returns
/// - API base URL like "https://bi.example.com"
/// - Empty string if window is not available (relative URLs are used then)
pub fn api_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/queries/123");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://bi.example.com", "/api/queries/1"), "https://bi.example.com/api/queries/1");
        assert_eq!(join_url("https://bi.example.com/", "api/queries/1"), "https://bi.example.com/api/queries/1");
        assert_eq!(join_url("", "/api/queries/1"), "/api/queries/1");
    }
}
