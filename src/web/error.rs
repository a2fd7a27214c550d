use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::notifications::SenderError;
use crate::sensor::client::SensorError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Group registry unavailable: {0}")]
    RegistryUnavailable(String),
    #[error("Station {0} not found")]
    StationNotFound(String),
    #[error("Sensor feed unavailable: {0}")]
    SensorUnavailable(String),
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("Messaging platform unreachable: {0}")]
    DeliveryUnreachable(String),
    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Malformed webhook bodies get the platform-facing shape so LINE's
        // retry logic sees a plain server error, not a partial success.
        if let AppError::MalformedPayload(msg) = &self {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "status": "error", "error": msg })),
            )
                .into_response();
        }

        let (status, error_message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RegistryUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Registry unavailable: {msg}"),
            ),
            AppError::StationNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Station {id} not found"))
            }
            AppError::SensorUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Sensor feed unavailable: {msg}"),
            ),
            AppError::DeliveryFailed(msg) => {
                (StatusCode::BAD_GATEWAY, format!("Delivery failed: {msg}"))
            }
            AppError::DeliveryUnreachable(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Messaging platform unreachable: {msg}"),
            ),
            AppError::MalformedPayload(_) => unreachable!(),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::RegistryUnavailable(err.to_string())
    }
}

impl From<SensorError> for AppError {
    fn from(err: SensorError) -> Self {
        match err {
            SensorError::StationNotFound(id) => AppError::StationNotFound(id),
            other => AppError::SensorUnavailable(other.to_string()),
        }
    }
}

impl From<SenderError> for AppError {
    fn from(err: SenderError) -> Self {
        match err {
            SenderError::DeliveryFailed { status, body } => {
                AppError::DeliveryFailed(format!("status {status}: {body}"))
            }
            SenderError::DeliveryUnreachable(e) => AppError::DeliveryUnreachable(e.to_string()),
        }
    }
}
