//! Domain model for the OpenF1 data API
//!
//! Upstream records are deserialized leniently: every field the pipelines do
//! not strictly need is optional, and unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lap_time::LapTime;

/// OpenF1 `session_key`
pub type SessionKey = i64;

/// OpenF1 `meeting_key`
pub type MeetingKey = i64;

/// Car number, unique within a session
pub type DriverNumber = u32;

/// Session kinds the pipelines classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionType {
    Qualifying,
    Race,
}

impl SessionType {
    /// Value used for the `session_type` / `session_name` API filters
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Qualifying => "Qualifying",
            SessionType::Race => "Race",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timed on-track activity (`/sessions`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Session {
    pub session_key: Option<SessionKey>,
    pub meeting_key: Option<MeetingKey>,
    pub session_name: Option<String>,
    pub session_type: Option<String>,
    /// ISO 8601 start timestamp, e.g. `2024-03-01T15:00:00+00:00`
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
}

/// A race weekend (`/meetings`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Meeting {
    pub meeting_key: Option<MeetingKey>,
    pub meeting_name: Option<String>,
    pub date_start: Option<String>,
    pub year: Option<i32>,
}

/// Roster entry (`/drivers`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Driver {
    pub driver_number: DriverNumber,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
}

impl Driver {
    pub fn new(driver_number: DriverNumber, full_name: &str, team_name: &str) -> Self {
        Self {
            driver_number,
            full_name: Some(full_name.to_string()),
            team_name: Some(team_name.to_string()),
        }
    }
}

/// One lap (`/laps`)
///
/// The duration may arrive in either field, as seconds or as `m:ss.fff` text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LapRecord {
    pub driver_number: Option<DriverNumber>,
    pub lap_number: Option<u32>,
    pub lap_duration: Option<LapTime>,
    pub lap_time: Option<LapTime>,
}

/// One sample of the live running order (`/position`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PositionSample {
    pub driver_number: DriverNumber,
    pub position: u32,
    /// ISO 8601 timestamp of the sample
    pub date: String,
}

/// One line of a final classification
///
/// Shared schema for the CLI output and the web facade.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassificationRow {
    pub position: u32,
    pub driver_number: DriverNumber,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
    /// Best lap in seconds (qualifying); `null` when no valid lap was set
    pub best_lap: Option<f64>,
}

impl ClassificationRow {
    /// Row built from a roster entry
    pub fn for_driver(position: u32, driver: &Driver, best_lap: Option<f64>) -> Self {
        Self {
            position,
            driver_number: driver.driver_number,
            full_name: driver.full_name.clone(),
            team_name: driver.team_name.clone(),
            best_lap,
        }
    }
}
