use studiofs_file_ops::FileOpsError;
use studiofs_protocol::ErrorKind;
use studiofs_sandbox::SandboxError;

/// Errors produced by project-level operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("project already exists: {0}")]
    AlreadyExists(String),

    #[error("failed to delete project {name}: {source}")]
    DeleteFailed {
        name: String,
        #[source]
        source: FileOpsError,
    },

    #[error("failed to scaffold project {name} ({file}): {source}")]
    ScaffoldFailed {
        name: String,
        file: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on project {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProjectError {
    /// Wire category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sandbox(e) => e.kind(),
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::DeleteFailed { .. } => ErrorKind::DeleteFailed,
            Self::ScaffoldFailed { .. } => ErrorKind::ScaffoldFailed,
            Self::Io { .. } => ErrorKind::IoFailure,
        }
    }
}
