//! Common error types for gridkit

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::SessionKey;

/// Common result type for gridkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds shared by the pipelines and the web facade
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP failure talking to the data API.
    /// Callers degrade this to an empty result.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Resolution cascade exhausted
    #[error("No session found: {0}")]
    NoSessionFound(String),

    /// Requested date has not happened yet (UTC)
    #[error("Date {0} is in the future, no data available yet")]
    FutureDate(NaiveDate),

    /// Driver roster for a session is empty
    #[error("No drivers found for session {0}")]
    NoDrivers(SessionKey),

    /// Position stream for a race session is empty
    #[error("No position data returned for session {0}")]
    NoPositionData(SessionKey),

    /// Lap duration string that cannot be read as seconds
    #[error("Malformed lap time value: {0:?}")]
    MalformedTimeValue(String),

    /// Date hint not in YYYY-MM-DD form
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the kinds that mean "nothing to resolve" rather than a fault
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoSessionFound(_) | Error::FutureDate(_))
    }
}
