//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use contracts::shared::selector::{FetchError, SearchRequest};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/a001/product/options");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL страницы поиска: `{base}{path}?page=..&page_size=..&query=..`
pub fn search_url(base: &str, path: &str, request: &SearchRequest) -> Result<String, FetchError> {
    let qs = serde_qs::to_string(request).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(format!("{}{}?{}", base, path, qs))
}

/// GET-запрос с разбором JSON-ответа
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        let req = SearchRequest {
            page: 2,
            page_size: 50,
            query: "кружка синяя".to_string(),
        };
        let url = search_url("http://localhost:3000", "/api/a001/product/options", &req).unwrap();
        assert!(url.starts_with("http://localhost:3000/api/a001/product/options?page=2&page_size=50&query="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_search_url_empty_query() {
        let req = SearchRequest::first_page(20, "");
        let url = search_url("", "/api/a002/store/options", &req).unwrap();
        assert_eq!(url, "/api/a002/store/options?page=1&page_size=20&query=");
    }
}
