use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rail_core::BookingError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    UnavailableError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, detail) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, "invalid request", Some(msg)),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, "not found", Some(msg)),
            AppError::UnavailableError(msg) => (StatusCode::SERVICE_UNAVAILABLE, "resource unavailable", Some(msg)),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error", None)
            },
        };

        let body = match detail {
            Some(message) => Json(json!({ "error": kind, "message": message })),
            None => Json(json!({ "error": kind })),
        };

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SeatUnavailable => AppError::UnavailableError(err.to_string()),
            BookingError::TicketNotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::Validation(msg) => AppError::ValidationError(msg),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}
