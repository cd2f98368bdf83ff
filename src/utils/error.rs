use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("The cancellation period of 30min is completed")]
    WindowExpired,

    #[error("Seat {0} is already taken for this show")]
    SeatTaken(String),

    #[error("Failed to generate a unique booking code")]
    CodeGenerationExhausted,

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyCancelled => StatusCode::CONFLICT,
            AppError::WindowExpired => StatusCode::CONFLICT,
            AppError::SeatTaken(_) => StatusCode::CONFLICT,
            AppError::CodeGenerationExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyCancelled => "ALREADY_CANCELLED",
            AppError::WindowExpired => "WINDOW_EXPIRED",
            AppError::SeatTaken(_) => "SEAT_TAKEN",
            AppError::CodeGenerationExhausted => "CODE_GENERATION_EXHAUSTED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
            other => {
                error!(error = ?other, code = other.code(), "Application error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        };

        // Do not expose internal details in the API response
        let details = None;

        error_response(code, public_message, details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_conflicts_map_to_409() {
        assert_eq!(
            AppError::AlreadyCancelled.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::WindowExpired.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::SeatTaken("A1".to_string()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn ownership_violations_map_to_403() {
        let err = AppError::Forbidden("not your booking".to_string());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn code_generation_exhaustion_is_a_server_error() {
        assert_eq!(
            AppError::CodeGenerationExhausted.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
