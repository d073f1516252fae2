//! gridkit-web library - HTTP facade
//!
//! Serves the qualifying pipeline as JSON next to a static front end.
//! The pipeline runs in-process against the shared `DataSource`.

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gridkit_common::DataSource;

pub mod api;
pub mod error;

pub use error::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream data (OpenF1 client in production)
    pub source: Arc<dyn DataSource>,
    /// Directory served for `/` and `/<path>`
    pub static_root: PathBuf,
    /// Dates in this year get the mock grid
    pub mock_season: Option<i32>,
    /// Server start, for uptime reporting
    pub startup_time: DateTime<Utc>,
    /// File names the static handler refuses in any directory
    pub protected_files: Vec<String>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, static_root: PathBuf, mock_season: Option<i32>) -> Self {
        Self {
            source,
            static_root,
            mock_season,
            startup_time: Utc::now(),
            protected_files: api::static_files::SERVER_CONFIG_FILES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Also refuse the file name of the configuration actually loaded
    pub fn with_config_file(mut self, path: &Path) -> Self {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !self.protected_files.iter().any(|p| p == name) {
                self.protected_files.push(name.to_string());
            }
        }
        self
    }
}

/// Build application router
///
/// API and health routes are matched first; every other path falls through
/// to the static file handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/qualifying", get(api::get_qualifying))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/", get(api::serve_index))
        .merge(api::health_routes())
        .fallback(api::serve_static)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
