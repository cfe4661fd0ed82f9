//! Error types for the surveyctl CLI

use thiserror::Error;

/// Result type alias for surveyctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not logged in. Run `surveyctl login` first.")]
    Unauthorized,

    #[error("Admin access required.")]
    Forbidden,

    #[error("{message}")]
    Backend {
        message: String,
        status: Option<u16>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Session-store errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not determine home directory")]
    NoHome,

    #[error("Failed to read session store: {0}")]
    Read(String),

    #[error("Failed to write session store: {0}")]
    Write(String),
}
