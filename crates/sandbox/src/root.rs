//! The top-level directory that holds every project.

use std::path::{Path, PathBuf};

use crate::resolver::PathResolver;
use crate::validation::validate_name;
use crate::SandboxError;

/// Owns the projects root directory.
///
/// The directory is created lazily the first time it is needed. Each project
/// is a direct child; [`project`](Self::project) hands out a
/// [`PathResolver`] confined to one of them.
#[derive(Debug, Clone)]
pub struct ProjectsRoot {
    path: PathBuf,
}

impl ProjectsRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured (not necessarily canonical) root path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the root directory if needed and returns its canonical path.
    pub fn ensure(&self) -> Result<PathBuf, SandboxError> {
        if !self.path.is_dir() {
            std::fs::create_dir_all(&self.path)?;
            tracing::info!(path = %self.path.display(), "created projects root");
        }
        Ok(std::fs::canonicalize(&self.path)?)
    }

    /// Location of the project directory called `name`, which may not exist.
    pub fn project_path(&self, name: &str) -> Result<PathBuf, SandboxError> {
        validate_name(name)?;
        Ok(self.ensure()?.join(name))
    }

    /// Returns a resolver confined to the existing project `name`.
    ///
    /// Fails with [`SandboxError::ProjectNotFound`] if the project is missing
    /// or not a directory, and with [`SandboxError::AccessDenied`] if the
    /// project directory is a link, which could alias another project or a
    /// path outside the root.
    pub fn project(&self, name: &str) -> Result<PathResolver, SandboxError> {
        validate_name(name)?;
        let root = std::fs::canonicalize(&self.path)
            .map_err(|_| SandboxError::ProjectNotFound(name.to_string()))?;
        let dir = root.join(name);

        if !dir.is_dir() {
            return Err(SandboxError::ProjectNotFound(name.to_string()));
        }

        let resolver = PathResolver::new(&dir)?;
        if resolver.root() != dir {
            tracing::warn!(
                project = name,
                resolved = %resolver.root().display(),
                "project directory is an alias, refusing to open it"
            );
            return Err(SandboxError::AccessDenied(format!(
                "project {name} is an alias of another directory"
            )));
        }

        Ok(resolver)
    }
}
