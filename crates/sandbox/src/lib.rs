//! Path containment for the studiofs projects tree.
//!
//! [`PathResolver`] is the single security boundary: every relative path a
//! caller supplies is resolved and checked against a canonical root before
//! any I/O happens. [`ProjectsRoot`] owns the top-level directory and hands
//! out one resolver per project.

mod resolver;
mod root;
mod validation;

pub use resolver::PathResolver;
pub use root::ProjectsRoot;
pub use validation::{normalize_relative_path, validate_name, validate_relative_path};

use studiofs_protocol::ErrorKind;

/// Errors produced by path resolution and project lookup.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SandboxError {
    /// Wire category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::InvalidName(_) => ErrorKind::InvalidName,
            Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::IoFailure,
        }
    }
}
