//! Error taxonomy shared by the note store, the encyclopedia client and the routes.

use axum::http::StatusCode;
use notebook_types::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotebookError {
    /// The document could not be loaded or persisted.
    #[error("storage unavailable ({path}): {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    /// The encyclopedia was unreachable, timed out or answered with something unexpected.
    #[error("reference lookup failed: {0}")]
    RemoteLookupFailed(String),

    /// A call arrived with a missing or invalid parameter.
    #[error("malformed call: {0}")]
    MalformedCall(String),
}

impl NotebookError {
    pub fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StorageUnavailable { .. } => ErrorKind::StorageUnavailable,
            Self::RemoteLookupFailed(_) => ErrorKind::RemoteLookupFailed,
            Self::MalformedCall(_) => ErrorKind::MalformedCall,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::RemoteLookupFailed(_) => StatusCode::BAD_GATEWAY,
            Self::MalformedCall(_) => StatusCode::BAD_REQUEST,
        }
    }
}

pub type NotebookResult<T> = Result<T, NotebookError>;
