use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::service::match_service::MatchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Internal server error")]
    InternalServerError,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NotFound(_) => ApiError::NotFound(err.to_string()),
            MatchError::InvalidState { .. }
            | MatchError::InvalidInput
            | MatchError::TeamsUnresolved => ApiError::BadRequest(err.to_string()),
            MatchError::Unauthorized => ApiError::Forbidden(err.to_string()),
            MatchError::AlreadyCompleted | MatchError::NoTeams => ApiError::Conflict(err.to_string()),
            MatchError::QueryFailed(message) => ApiError::DatabaseError(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
    details: Option<String>,
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let (status, message) = match self {
            ApiError::InternalServerError => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
            ),
            ApiError::BadRequest(_) => (actix_web::http::StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Unauthorized => {
                (actix_web::http::StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::Forbidden(_) => (actix_web::http::StatusCode::FORBIDDEN, self.to_string()),
            ApiError::NotFound(_) => (actix_web::http::StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Conflict(_) => (actix_web::http::StatusCode::CONFLICT, self.to_string()),
            ApiError::DatabaseError(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            ApiError::ValidationError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, self.to_string())
            }
        };

        let error_response = ErrorResponse {
            error: message,
            code: status.as_u16(),
            details: Some(self.to_string()),
        };

        HttpResponse::build(status).json(error_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::match_model::MatchStatus;
    use actix_web::http::StatusCode;

    fn status_of(err: MatchError) -> StatusCode {
        ApiError::from(err).error_response().status()
    }

    #[test]
    fn test_match_error_status_mapping() {
        assert_eq!(status_of(MatchError::NotFound("match")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(MatchError::InvalidState {
                expected: MatchStatus::Ready,
                actual: MatchStatus::Scheduled,
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(MatchError::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(MatchError::TeamsUnresolved), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(MatchError::Unauthorized), StatusCode::FORBIDDEN);
        assert_eq!(status_of(MatchError::AlreadyCompleted), StatusCode::CONFLICT);
        assert_eq!(status_of(MatchError::NoTeams), StatusCode::CONFLICT);
        assert_eq!(
            status_of(MatchError::QueryFailed("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
