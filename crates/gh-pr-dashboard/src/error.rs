//! HTTP error responses
//!
//! Every failure is answered with `{ "error": message }` and a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gh_client::ClientError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub token not configured. Please set GITHUB_TOKEN in .env file.")]
    MissingToken,

    #[error("No repositories configured. Please set REPOSITORIES in .env file.")]
    NoRepositories,

    /// GitHub failed; its status is passed through.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::NoRepositories | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Upstream { status, .. } => *status,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Map a failed file-list fetch to the response the browser sees.
    pub fn from_files_error(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, message } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let reason = status.canonical_reason().unwrap_or("Unknown error");
                log::error!("Error fetching PR files: {} {} ({})", status.as_u16(), reason, message);
                ApiError::Upstream {
                    status,
                    message: format!("Failed to fetch PR files: {}", reason),
                }
            }
            other => {
                log::error!("Error fetching PR files: {}", other);
                ApiError::Internal(format!("Internal server error: {}", other))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
