use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Request-level failures of the booking API. None of these are fatal to the
/// process; each maps to a 400 with a `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Missing required fields")]
    MissingFields,
    #[error("Slot is not available")]
    SlotUnavailable,
}

impl BookingError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
