use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use swimbuddz_services::auth::AuthError;
use swimbuddz_services::dao::base::DaoError;
use swimbuddz_services::members::MemberFetchError;
use swimbuddz_services::readiness::ReadinessServiceError;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Unauthorized(String),
    Conflict(String),
    Internal(String),
    Validation(String),
    BadGateway(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::Internal(msg) => {
                error!(%msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg)
            }
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "bad_gateway", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
            DaoError::Mongo(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonSer(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

impl From<MemberFetchError> for ApiError {
    fn from(err: MemberFetchError) -> Self {
        match err {
            MemberFetchError::Unauthorized => {
                ApiError::Unauthorized("Members API rejected the token".to_string())
            }
            MemberFetchError::NotFound => ApiError::NotFound("Member not found".to_string()),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<ReadinessServiceError> for ApiError {
    fn from(err: ReadinessServiceError) -> Self {
        match err {
            ReadinessServiceError::Member(e) => e.into(),
            // The snapshot came from the members API, so a malformed one is
            // an upstream fault.
            ReadinessServiceError::Snapshot(e) => ApiError::BadGateway(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
