//! OpenF1 public data API
//!
//! Read-only JSON API. Every endpoint returns an array of records filtered by
//! query parameters: `GET {base}/{endpoint}?key=value&...`.

pub mod client;

pub use client::{OpenF1Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
