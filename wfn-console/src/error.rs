use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use wfn_core::ApiError;

/// Handler failures that are not shown as an in-page alert.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Malformed form submission: {0}")]
    Form(#[from] MultipartError),

    #[error("No {noun} with id {id}")]
    NotFound { noun: &'static str, id: i64 },

    #[error("Backend request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),

    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::Form(_) => StatusCode::BAD_REQUEST,
            ConsoleError::NotFound { .. } => StatusCode::NOT_FOUND,
            ConsoleError::Api(_) => StatusCode::BAD_GATEWAY,
            ConsoleError::Template(_)
            | ConsoleError::Pdf(_)
            | ConsoleError::Session(_)
            | ConsoleError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => "Something went wrong. Please try again.".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}
