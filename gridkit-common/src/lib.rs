//! # gridkit Common Library
//!
//! Shared code for the gridkit pipelines and web facade:
//! - Domain model (sessions, meetings, drivers, laps, position samples)
//! - OpenF1 API client and the `DataSource` seam
//! - Session resolution cascade
//! - Lap time normalization
//! - Configuration loading and logging setup
//! - Error types

pub mod config;
pub mod error;
pub mod lap_time;
pub mod logging;
pub mod model;
pub mod openf1;
pub mod resolver;
pub mod source;
pub mod time;

pub use error::{Error, Result};
pub use model::{ClassificationRow, Driver, DriverNumber, MeetingKey, SessionKey, SessionType};
pub use resolver::{SessionHint, SessionResolver};
pub use source::{DataSource, MemorySource};
