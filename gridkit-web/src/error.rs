//! Error responses for gridkit-web

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed query parameter (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Static path that must not be served (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Qualifying pipeline failure (500)
    #[error(transparent)]
    Pipeline(#[from] gridkit_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(details) => {
                warn!("Rejected qualifying request: {}", details);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid request", "details": details }),
                )
            }
            ApiError::Forbidden(path) => {
                warn!("Refused static path: {}", path);
                (StatusCode::FORBIDDEN, json!({ "error": "Access forbidden" }))
            }
            ApiError::Pipeline(err) => {
                if err.is_not_found() {
                    warn!("No qualifying session to report: {}", err);
                } else {
                    error!("Qualifying pipeline failed: {}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to get qualifying results",
                        "details": err.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("date".into()), StatusCode::BAD_REQUEST),
            (ApiError::Forbidden(".env".into()), StatusCode::FORBIDDEN),
            (
                ApiError::Pipeline(gridkit_common::Error::NoSessionFound("latest".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_not_found_and_faults_share_envelope() {
        let date = chrono::NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
        for err in [
            gridkit_common::Error::FutureDate(date),
            gridkit_common::Error::Transport("connection reset".into()),
        ] {
            let not_found = err.is_not_found();
            let response = ApiError::Pipeline(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "not_found={not_found}");

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"], "Failed to get qualifying results");
        }
    }
}
