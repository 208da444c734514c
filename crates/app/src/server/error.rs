use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use services::{QuizError, SessionError, WordServiceError};
use storage::repository::StorageError;

/// Error returned by every handler; rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::not_found(),
            StorageError::Conflict => Self::new(StatusCode::CONFLICT, err.to_string()),
            StorageError::Rejected(_) | StorageError::Invalid(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl From<WordServiceError> for ApiError {
    fn from(err: WordServiceError) -> Self {
        match err {
            WordServiceError::Word(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            WordServiceError::Storage(e) => e.into(),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        let status = match err {
            QuizError::EmptySelection => StatusCode::BAD_REQUEST,
            _ => StatusCode::CONFLICT,
        };
        Self::new(status, err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AlreadyActive | SessionError::NoActiveSession => {
                Self::new(StatusCode::CONFLICT, err.to_string())
            }
            SessionError::Quiz(e) => e.into(),
            // The game is untouched; the store is the party that failed.
            SessionError::Words(WordServiceError::Storage(e)) => {
                Self::new(StatusCode::BAD_GATEWAY, e.to_string())
            }
            SessionError::Words(e) => e.into(),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}
