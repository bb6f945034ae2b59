use studiofs_file_ops::FileOpsError;
use studiofs_protocol::ErrorKind;
use studiofs_sandbox::SandboxError;

/// Errors produced by clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard is empty")]
    Empty,

    #[error("destination is not a folder: {0}")]
    NotADirectory(String),

    #[error("clipboard source no longer exists: {0}")]
    SourceNotFound(String),

    #[error("invalid paste destination: {0}")]
    InvalidDestination(String),

    #[error("failed to move {path}: {reason}")]
    MoveFailed { path: String, reason: String },

    #[error(transparent)]
    FileOps(#[from] FileOpsError),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}

impl ClipboardError {
    /// Wire category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::ClipboardEmpty,
            Self::NotADirectory(_) => ErrorKind::NotADirectory,
            Self::SourceNotFound(_) => ErrorKind::NotFound,
            Self::InvalidDestination(_) => ErrorKind::InvalidDestination,
            Self::MoveFailed { .. } => ErrorKind::MoveFailed,
            Self::FileOps(e) => e.kind(),
            Self::Sandbox(e) => e.kind(),
        }
    }
}
