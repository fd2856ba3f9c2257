use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{data_access::task_store::StoreError, error_response::ErrorResponse};

const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred while handling your board";

/// Everything a board request can fail with.
///
/// The first four variants are client mistakes and map to 400. Cross-owner
/// access is reported as `NotFound`, never as a permission problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("missing value for field \"{0}\"")]
    MissingValue(String),

    #[error("The status '{0}' is invalid")]
    InvalidStatus(String),

    #[error("The task id '{0}' does not exist")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl BoardError {
    /// Stable `type` tag of the error descriptor.
    pub fn error_type(&self) -> &'static str {
        match self {
            BoardError::MissingValue(_) => "MissingValueError",
            BoardError::InvalidStatus(_) => "InvalidStatusError",
            BoardError::NotFound(_) => "NotFoundError",
            BoardError::Validation(_) => "ValidationError",
            BoardError::Unauthorized(_) => "AuthenticationError",
            BoardError::Store(_) | BoardError::Internal(_) => "GenericError",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::MissingValue(_)
            | BoardError::InvalidStatus(_)
            | BoardError::NotFound(_)
            | BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BoardError::Store(_) | BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The descriptor sent to the client. Internal detail stays in the logs.
    pub fn to_descriptor(&self) -> ErrorResponse {
        let message = match self {
            BoardError::Store(_) | BoardError::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };
        ErrorResponse {
            error_type: self.error_type().to_string(),
            message,
        }
    }
}

impl From<QueryRejection> for BoardError {
    fn from(rejection: QueryRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for BoardError {
    fn from(rejection: PathRejection) -> Self {
        BoardError::Validation(rejection.body_text())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "board request failed");
        } else {
            tracing::warn!(error_type = self.error_type(), error = %self, "board request rejected");
        }
        (status, Json(self.to_descriptor())).into_response()
    }
}
