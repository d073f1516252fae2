//! Qualifying pipeline: hint → session → classification (or P15)
//!
//! Shared by the `gridkit-quali` binary and the web facade. Only an exhausted
//! session resolution is an error; a classification that cannot be built is
//! logged and reported as empty.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};
use tracing::{error, info};

use gridkit_common::{
    ClassificationRow, DataSource, MeetingKey, Result, SessionHint, SessionKey, SessionResolver,
    SessionType,
};

use crate::classify::build_qualifying;
use crate::mock::{is_mock_date, mock_grid};
use crate::p15::p15_of;

/// Flags as given on the command line or query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifyingRequest {
    pub session: Option<SessionKey>,
    pub meeting: Option<MeetingKey>,
    pub date: Option<NaiveDate>,
    pub p15: bool,
}

impl QualifyingRequest {
    pub fn hint(&self) -> SessionHint {
        SessionHint::from_flags(self.session, self.meeting, self.date)
    }
}

/// What the pipeline produced
#[derive(Debug, Clone, PartialEq)]
pub enum QualifyingReport {
    /// Full classification; empty when it could not be built
    Classification(Vec<ClassificationRow>),
    /// `--p15` answer; `None` when fewer than 15 rows exist
    P15(Option<ClassificationRow>),
    /// Fixed grid for the mock season
    MockGrid(Vec<ClassificationRow>),
}

impl QualifyingReport {
    /// JSON payload: an array of rows, one row object, or `{}` for no P15
    pub fn to_json(&self) -> Value {
        match self {
            QualifyingReport::Classification(rows) | QualifyingReport::MockGrid(rows) => json!(rows),
            QualifyingReport::P15(Some(row)) => json!(row),
            QualifyingReport::P15(None) => json!({}),
        }
    }
}

/// Run the pipeline against a data source
///
/// `mock_season` short-circuits any date in that year to the mock grid,
/// whatever the other flags say.
pub async fn run(
    source: &dyn DataSource,
    request: &QualifyingRequest,
    mock_season: Option<i32>,
    now: DateTime<Utc>,
) -> Result<QualifyingReport> {
    if let Some(date) = request.date {
        if is_mock_date(date, mock_season) {
            info!("Using mock data for date: {}", date);
            return Ok(QualifyingReport::MockGrid(mock_grid()));
        }
    }

    let resolver = SessionResolver::new(source, SessionType::Qualifying).at(now);
    let session_key = resolver.resolve(&request.hint()).await?;

    if request.p15 {
        info!("Fetching P15 driver for session_key: {}", session_key);
        let rows = classification_or_empty(source, session_key).await;
        Ok(QualifyingReport::P15(p15_of(&rows)))
    } else {
        info!("Fetching full qualifying classification for session_key: {}", session_key);
        let rows = classification_or_empty(source, session_key).await;
        if rows.is_empty() {
            info!("Qualifying classification for session_key {} is empty", session_key);
        }
        Ok(QualifyingReport::Classification(rows))
    }
}

async fn classification_or_empty(source: &dyn DataSource, session_key: SessionKey) -> Vec<ClassificationRow> {
    match build_qualifying(source, session_key).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Could not get qualifying results for session_key {}: {}", session_key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit_common::Driver;

    #[test]
    fn test_report_json_shapes() {
        let row = ClassificationRow::for_driver(15, &Driver::new(27, "Nico Hulkenberg", "Kick Sauber"), Some(88.1));

        let list = QualifyingReport::Classification(vec![row.clone()]).to_json();
        assert!(list.is_array());
        assert_eq!(list[0]["full_name"], "Nico Hulkenberg");

        let single = QualifyingReport::P15(Some(row)).to_json();
        assert_eq!(single["position"], 15);
        assert_eq!(single["best_lap"], 88.1);

        assert_eq!(QualifyingReport::P15(None).to_json(), json!({}));
        assert_eq!(QualifyingReport::Classification(vec![]).to_json(), json!([]));
    }

    #[test]
    fn test_request_hint_precedence() {
        let request = QualifyingRequest {
            session: None,
            meeting: Some(1229),
            date: NaiveDate::from_ymd_opt(2024, 3, 2),
            p15: false,
        };
        assert_eq!(request.hint(), SessionHint::Meeting(1229));
    }
}
