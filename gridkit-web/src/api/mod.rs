//! HTTP handlers

pub mod buildinfo;
pub mod health;
pub mod qualifying;
pub mod static_files;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use qualifying::get_qualifying;
pub use static_files::{serve_index, serve_static};
