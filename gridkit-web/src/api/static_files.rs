//! Static front-end files
//!
//! Everything under the static root is public except hidden entries,
//! directory listings and the server's own configuration file.

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use gridkit_common::config::CONFIG_FILE_NAME;

use crate::{ApiError, AppState};

/// Configuration file names never served, whatever directory they sit in
pub const SERVER_CONFIG_FILES: [&str; 2] = ["gridkit.toml", CONFIG_FILE_NAME];

/// Whether a decoded request path (without the leading `/`) must be refused
///
/// `protected` holds file names refused in any directory.
pub fn is_forbidden(path: &str, protected: &[String]) -> bool {
    if path.ends_with('/') {
        return true;
    }
    if path.split('/').any(|segment| segment.starts_with('.')) {
        return true;
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    protected.iter().any(|name| name == file_name)
}

/// Decode the raw URI path the way `ServeDir` will before checking it
///
/// A path that is not valid UTF-8 once decoded is refused.
pub fn is_forbidden_uri_path(raw: &str, protected: &[String]) -> bool {
    let raw = raw.trim_start_matches('/');
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => is_forbidden(decoded.trim_start_matches('/'), protected),
        Err(_) => true,
    }
}

/// GET /
pub async fn serve_index(State(state): State<AppState>, request: Request) -> Response {
    let index = ServeFile::new(state.static_root.join("index.html"));
    match index.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Any path not claimed by another route
pub async fn serve_static(State(state): State<AppState>, request: Request) -> Result<Response, ApiError> {
    let path = request.uri().path();
    if is_forbidden_uri_path(path, &state.protected_files) {
        return Err(ApiError::Forbidden(path.to_string()));
    }

    let files = ServeDir::new(&state.static_root).append_index_html_on_directories(false);
    match files.oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protected() -> Vec<String> {
        SERVER_CONFIG_FILES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_forbidden_paths() {
        let names = protected();
        assert!(is_forbidden("css/", &names));
        assert!(is_forbidden(".env", &names));
        assert!(is_forbidden(".git/config", &names));
        assert!(is_forbidden("assets/.secret", &names));
        assert!(is_forbidden("gridkit.toml", &names));
        assert!(is_forbidden("config.toml", &names));
        assert!(is_forbidden("docs/gridkit.toml", &names));
    }

    #[test]
    fn test_allowed_paths() {
        let names = protected();
        assert!(!is_forbidden("index.html", &names));
        assert!(!is_forbidden("js/app.js", &names));
        assert!(!is_forbidden("css/site.v2.css", &names));
        assert!(!is_forbidden("gridkit.toml.html", &names));
    }

    #[test]
    fn test_encoded_paths_checked_after_decoding() {
        let names = protected();
        assert!(is_forbidden_uri_path("/gridkit%2Etoml", &names));
        assert!(is_forbidden_uri_path("/%67ridkit.toml", &names));
        assert!(is_forbidden_uri_path("/%2Eenv", &names));
        assert!(is_forbidden_uri_path("/js%2F", &names));
        assert!(is_forbidden_uri_path("/%FF", &names));
        assert!(!is_forbidden_uri_path("/js/app%2Ejs", &names));
    }

    #[test]
    fn test_loaded_config_name_protected() {
        let mut names = protected();
        names.push("site.toml".to_string());
        assert!(is_forbidden_uri_path("/site.toml", &names));
        assert!(is_forbidden_uri_path("/site%2etoml", &names));
    }
}
