use studiofs_clipboard::ClipboardError;
use studiofs_file_ops::FileOpsError;
use studiofs_projects::ProjectError;
use studiofs_protocol::ErrorKind;
use studiofs_sandbox::SandboxError;

/// Any failure surfaced by [`StudioService`](crate::StudioService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error(transparent)]
    FileOps(#[from] FileOpsError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sandbox(e) => e.kind(),
            Self::FileOps(e) => e.kind(),
            Self::Project(e) => e.kind(),
            Self::Clipboard(e) => e.kind(),
        }
    }
}
