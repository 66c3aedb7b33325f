use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::notify::Level;

/// Failures surfaced by the booking core. Every variant is recovered at
/// the call boundary and turned into a user-facing message; none crash
/// the process.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("you must be signed in to manage bookings")]
    NotAuthenticated,

    #[error("you do not have permission to modify this booking")]
    PermissionDenied,

    #[error("this slot is already booked, please select another time or resource")]
    SlotConflict,

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("a {from} booking cannot be changed to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("database error: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("database write error: {0}")]
    Write(#[source] rusqlite::Error),
}

impl BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            BookingError::PermissionDenied => StatusCode::FORBIDDEN,
            BookingError::SlotConflict => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Query(_) | BookingError::Write(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Severity reported alongside the message.
    pub fn level(&self) -> Level {
        match self {
            BookingError::SlotConflict | BookingError::InvalidTransition { .. } => Level::Warning,
            _ => Level::Error,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "store operation failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "severity": self.level().as_str(),
        });
        (status, axum::Json(body)).into_response()
    }
}
