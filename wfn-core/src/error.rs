use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the REST backend. Nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid attachment {file_name}: {source}")]
    Attachment {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[derive(Debug, Error)]
#[error("Token store error: {0}")]
pub struct StoreError(pub String);

#[derive(Debug, Error)]
pub enum SessionError {
    /// Deliberately generic: the backend's reason is only logged.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Please fill in all required fields.")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}
