use thiserror::Error;

/// Failure of a single call to the catalog service, already classified.
///
/// The message is what the user sees: either the server's own `error` text or
/// the fallback string for the endpoint that was called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    Failed { status: u16, message: String },
    #[error("{message} ({detail})")]
    Transport { message: String, detail: String },
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Failed { status, message },
        }
    }

    pub fn transport(message: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Transport {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
