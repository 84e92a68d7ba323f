use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SambazaError {
    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl IntoResponse for SambazaError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            SambazaError::DatabaseError(_) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                };
                (status, body)
            }

            SambazaError::JsonError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "BAD_UPSTREAM_PAYLOAD".to_string(),
                    message: "Failed to parse provider response.".to_string(),
                    details: None,
                };
                (status, body)
            }

            SambazaError::ReqwestError(_) => {
                let status = StatusCode::BAD_GATEWAY;
                let body = ApiErrorObject {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "Upstream service error.".to_string(),
                    details: None,
                };
                (status, body)
            }

            SambazaError::UpstreamStatus(code) => {
                let (err_code, msg) = match code {
                    StatusCode::TOO_MANY_REQUESTS => {
                        ("RATE_LIMIT", "Upstream rate limit exceeded.")
                    }
                    StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "Upstream authentication failed."),
                    StatusCode::FORBIDDEN => ("FORBIDDEN", "Upstream permission denied."),
                    _ => ("UPSTREAM_ERROR", "An upstream error occurred."),
                };
                (
                    code,
                    ApiErrorObject {
                        code: err_code.to_string(),
                        message: msg.to_string(),
                        details: None,
                    },
                )
            }
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
