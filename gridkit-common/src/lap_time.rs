//! Lap duration normalization
//!
//! The laps endpoint reports durations as plain seconds (`83.456`) or as
//! colon-delimited text (`"1:23.456"`, `"1:02:03.5"`). Each colon component is
//! one base-60 unit, counted from the right: seconds, minutes, hours.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A raw lap duration as delivered upstream
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LapTime {
    Seconds(f64),
    Text(String),
}

impl LapTime {
    /// Duration in seconds
    pub fn to_seconds(&self) -> Result<f64> {
        match self {
            LapTime::Seconds(secs) => Ok(*secs),
            LapTime::Text(text) => parse_lap_time(text),
        }
    }
}

/// Parse `"m:ss.fff"` (any number of colon components) or a bare number
pub fn parse_lap_time(text: &str) -> Result<f64> {
    let malformed = || Error::MalformedTimeValue(text.to_string());

    let mut total = 0.0;
    for (exponent, component) in text.rsplit(':').enumerate() {
        let value: f64 = component.trim().parse().map_err(|_| malformed())?;
        total += value * 60f64.powi(exponent as i32);
    }

    if total.is_finite() {
        Ok(total)
    } else {
        Err(malformed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_close(parse_lap_time("1:23.456").unwrap(), 83.456);
    }

    #[test]
    fn test_zero_minutes() {
        assert_close(parse_lap_time("0:59.999").unwrap(), 59.999);
    }

    #[test]
    fn test_hours_component() {
        assert_close(parse_lap_time("1:02:03.5").unwrap(), 3723.5);
    }

    #[test]
    fn test_bare_number_text() {
        assert_close(parse_lap_time("91.2").unwrap(), 91.2);
    }

    #[test]
    fn test_numeric_passes_through() {
        assert_eq!(LapTime::Seconds(88.123).to_seconds().unwrap(), 88.123);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = parse_lap_time("1:xx.5").unwrap_err();
        assert!(matches!(err, Error::MalformedTimeValue(ref s) if s == "1:xx.5"));
    }

    #[test]
    fn test_empty_component_is_malformed() {
        assert!(parse_lap_time(":").is_err());
        assert!(parse_lap_time("").is_err());
    }

    #[test]
    fn test_non_finite_is_malformed() {
        assert!(parse_lap_time("inf").is_err());
        assert!(parse_lap_time("NaN").is_err());
    }
}
