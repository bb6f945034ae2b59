//! Error types for file operations.

use studiofs_protocol::ErrorKind;
use studiofs_sandbox::SandboxError;

/// Errors produced by file and folder operations.
#[derive(Debug, thiserror::Error)]
pub enum FileOpsError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("path not found: {0}")]
    NotFound(String),

    #[error("path already exists: {0}")]
    AlreadyExists(String),

    #[error("not a text file: {0}")]
    NotText(String),

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("failed to delete {path}: {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FileOpsError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wire category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sandbox(e) => e.kind(),
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::NotText(_) => ErrorKind::NotText,
            Self::InvalidDestination(_) => ErrorKind::InvalidDestination,
            Self::DeleteFailed { .. } => ErrorKind::DeleteFailed,
            Self::Io { .. } => ErrorKind::IoFailure,
        }
    }
}
