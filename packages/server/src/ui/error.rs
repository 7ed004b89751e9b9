//! HTTP error type and its mapping onto the response envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::AuthError,
    infrastructure::dto::{http::ApiResponse, websocket::UNAUTHORIZED},
    usecase::{RecordedAttendanceError, StartSessionError},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", UNAUTHORIZED)]
    Unauthorized(AuthError),

    #[error("Invalid request schema")]
    InvalidRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Details are logged, never returned to the client.
    #[error("Server error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(detail) => tracing::error!(%status, %detail, "request failed"),
            ApiError::Unauthorized(reason) => tracing::warn!(%status, %reason, "request rejected"),
            ApiError::InvalidRequest(detail) => tracing::warn!(%status, %detail, "request rejected"),
            _ => tracing::warn!(%status, error = %self, "request rejected"),
        }
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Unauthorized(e)
    }
}

impl From<StartSessionError> for ApiError {
    fn from(e: StartSessionError) -> Self {
        match e {
            StartSessionError::NotTeacher | StartSessionError::NotClassTeacher => {
                ApiError::Forbidden(e.to_string())
            }
            StartSessionError::ClassNotFound(_) => ApiError::NotFound("Class not found".to_string()),
            StartSessionError::Session(_) => ApiError::Conflict(e.to_string()),
            StartSessionError::Repository(_) | StartSessionError::InvalidId(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<RecordedAttendanceError> for ApiError {
    fn from(e: RecordedAttendanceError) -> Self {
        match e {
            RecordedAttendanceError::NotStudent => ApiError::Forbidden(e.to_string()),
            RecordedAttendanceError::Repository(_) => ApiError::Internal(e.to_string()),
        }
    }
}
