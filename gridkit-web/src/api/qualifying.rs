//! Qualifying results endpoint
//!
//! `GET /api/qualifying?date=YYYY-MM-DD&p15=true` answers with exactly what
//! `gridkit-quali` would print for the same flags.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use gridkit_common::time;
use gridkit_quali::{run, QualifyingRequest};

use crate::{ApiError, AppState};

/// Query string of `/api/qualifying`
#[derive(Debug, Default, Deserialize)]
pub struct QualifyingParams {
    /// Race weekend date; absent or empty means auto-detect
    pub date: Option<String>,
    /// Only the literal `true` enables P15 mode
    pub p15: Option<String>,
}

impl QualifyingParams {
    pub fn to_request(&self) -> Result<QualifyingRequest, ApiError> {
        let date = match self.date.as_deref() {
            Some(text) if !text.is_empty() => {
                Some(time::parse_date(text).map_err(|e| ApiError::BadRequest(e.to_string()))?)
            }
            _ => None,
        };

        Ok(QualifyingRequest {
            session: None,
            meeting: None,
            date,
            p15: self.p15.as_deref() == Some("true"),
        })
    }
}

/// GET /api/qualifying
pub async fn get_qualifying(
    State(state): State<AppState>,
    Query(params): Query<QualifyingParams>,
) -> Result<Json<Value>, ApiError> {
    let request = params.to_request()?;
    info!(date = ?request.date, p15 = request.p15, "Qualifying request");

    let report = run(state.source.as_ref(), &request, state.mock_season, time::now()).await?;
    Ok(Json(report.to_json()))
}
