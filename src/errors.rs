use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

/// Application-specific error types.
///
/// Every variant is terminal for the request: nothing is retried. The
/// caller-facing bodies are fixed shapes; internal detail stays in the logs,
/// except for the downstream's own response body which the contract echoes.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Request used a method other than POST/OPTIONS.
    MethodNotAllowed,
    /// Request body was not a JSON object (or an encoded one).
    InvalidBody(String),
    /// No Sollit credential configured.
    MissingConfig,
    /// Strict mode only: required lead fields absent.
    Validation(Vec<&'static str>),
    /// Sollit answered with a non-2xx status.
    SollitRejection {
        /// Downstream HTTP status code.
        status: u16,
        /// Downstream response body (empty object if unparsable).
        details: Value,
    },
    /// The outbound call itself failed (connect, DNS, timeout).
    Transport(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
            AppError::MissingConfig => write!(f, "Missing Sollit API credential"),
            AppError::Validation(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            AppError::SollitRejection { status, details } => {
                write!(f, "Sollit API rejected lead ({}): {}", status, details)
            }
            AppError::Transport(msg) => write!(f, "Transport failure: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into the fixed caller-facing HTTP response.
    ///
    /// Logs each failure server-side before mapping it; the downstream status
    /// and body pass through verbatim for `SollitRejection`, everything else
    /// maps to a constant message.
    fn into_response(self) -> Response {
        match self {
            AppError::MethodNotAllowed => {
                tracing::debug!("Rejected non-POST lead request");
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(json!({ "message": "Method not allowed" })),
                )
                    .into_response()
            }
            AppError::InvalidBody(msg) => {
                tracing::warn!("Invalid lead body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Invalid JSON" })),
                )
                    .into_response()
            }
            AppError::MissingConfig => {
                tracing::error!("Missing SOLLIT_API_KEY - cannot submit lead");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server config error" })),
                )
                    .into_response()
            }
            AppError::Validation(ref fields) => {
                tracing::warn!("Lead rejected, missing fields: {}", fields.join(", "));
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "message": format!("Missing required fields: {}", fields.join(", "))
                    })),
                )
                    .into_response()
            }
            AppError::SollitRejection { status, details } => {
                tracing::error!("Sollit API error: {} {}", status, details);
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (
                    status,
                    Json(json!({
                        "message": "Error from Sollit API",
                        "details": details,
                    })),
                )
                    .into_response()
            }
            AppError::Transport(msg) => {
                tracing::error!("Server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}
