//! Error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use focus_api::ErrorBody;
use focus_store::StoreError;
use focus_util::FocusError;
use thiserror::Error;
use tracing::error;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Focus(#[from] FocusError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    ///
    /// - Validation: 400 Bad Request
    /// - Session already running: 409 Conflict
    /// - Store failures: 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Focus(FocusError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Focus(FocusError::SessionAlreadyActive) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}
