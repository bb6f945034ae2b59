//! Relative-path resolution with containment checks.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::SandboxError;
use crate::validation::validate_relative_path;

/// Resolves caller-supplied relative paths against a canonical root.
///
/// A resolved path is either the root itself or lies strictly below it.
/// Canonicalization failures are reported as [`SandboxError::AccessDenied`],
/// never silently permitted.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver for an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root).map_err(|e| {
            SandboxError::AccessDenied(format!("cannot resolve root {}: {e}", root.display()))
        })?;

        if !canonical.is_dir() {
            return Err(SandboxError::AccessDenied(format!(
                "root is not a directory: {}",
                canonical.display()
            )));
        }

        Ok(Self { root: canonical })
    }

    /// Canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `relative` to an absolute, canonical path inside the root.
    ///
    /// Symlinks are followed. Trailing components that do not exist yet are
    /// appended to the canonical form of their deepest existing ancestor, so
    /// paths for entries about to be created resolve too.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, SandboxError> {
        validate_relative_path(relative)?;
        let parts = normal_components(relative);
        self.resolve_parts(&parts, relative)
    }

    /// Resolves the location of the entry named by `relative` without
    /// following the entry itself.
    ///
    /// The parent is resolved like [`resolve`](Self::resolve) and the final
    /// name is appended as-is, so a symlink is addressed as a link. The root
    /// itself is not an entry and is rejected.
    pub fn resolve_entry(&self, relative: &str) -> Result<PathBuf, SandboxError> {
        validate_relative_path(relative)?;
        let parts = normal_components(relative);

        let Some((name, parent)) = parts.split_last() else {
            return Err(SandboxError::AccessDenied(
                "operation not allowed on the project root".into(),
            ));
        };

        let mut entry = self.resolve_parts(parent, relative)?;
        entry.push(name);
        Ok(entry)
    }

    /// Returns true if `path` is the root or lies below it.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    /// Converts a contained absolute path to a `/`-separated relative path.
    ///
    /// The root itself maps to the empty string.
    pub fn relative_of(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn resolve_parts(&self, parts: &[&OsStr], relative: &str) -> Result<PathBuf, SandboxError> {
        let mut joined = self.root.clone();
        for part in parts {
            joined.push(part);
        }

        let resolved = canonicalize_lenient(&joined).map_err(|e| {
            SandboxError::AccessDenied(format!("cannot resolve {relative:?}: {e}"))
        })?;

        if !self.contains(&resolved) {
            tracing::warn!(
                relative,
                resolved = %resolved.display(),
                root = %self.root.display(),
                "path escapes sandbox root"
            );
            return Err(SandboxError::AccessDenied(format!(
                "path escapes project root: {relative}"
            )));
        }

        Ok(resolved)
    }
}

/// Normal components of an already-validated relative path.
fn normal_components(relative: &str) -> Vec<&OsStr> {
    Path::new(relative)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Canonicalizes the deepest existing ancestor of `path` and re-appends the
/// components below it that do not exist yet.
fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut tail: Vec<OsString> = Vec::new();

    loop {
        match std::fs::symlink_metadata(&existing) {
            Ok(_) => break,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                let Some(name) = existing.file_name() else {
                    return Err(e);
                };
                tail.push(name.to_os_string());
                if !existing.pop() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }

    let mut resolved = std::fs::canonicalize(&existing)?;
    for name in tail.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}
