//! Backend address helpers.

/// Port the axum backend listens on
pub const BACKEND_PORT: u16 = 3000;

/// Base URL for API requests, built from the page location
///
/// Returns e.g. `http://localhost:3000`, or an empty string outside a browser.
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
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Full API URL for a path starting with `/api/`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `{base}/{id}` with the id percent-encoded
pub fn item_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("/api/branches", "b-1"), "/api/branches/b-1");
        assert_eq!(item_path("/api/branches", "a/b"), "/api/branches/a%2Fb");
    }
}
