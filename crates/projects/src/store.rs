//! Project listing, creation and deletion.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use studiofs_file_ops::remove_tree;
use studiofs_protocol::ProjectSummary;
use studiofs_sandbox::{ProjectsRoot, validate_name};

use crate::ProjectError;
use crate::templates::starter_files;

/// Writes one starter file into a freshly created project.
pub trait TemplateWriter: Send + Sync {
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}

/// Writes starter files to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTemplateWriter;

impl TemplateWriter for FsTemplateWriter {
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

/// Lists, creates and deletes projects under a [`ProjectsRoot`].
pub struct ProjectStore<W = FsTemplateWriter> {
    root: ProjectsRoot,
    writer: W,
}

impl ProjectStore<FsTemplateWriter> {
    pub fn new(root: ProjectsRoot) -> Self {
        Self::with_writer(root, FsTemplateWriter)
    }
}

impl<W: TemplateWriter> ProjectStore<W> {
    pub fn with_writer(root: ProjectsRoot, writer: W) -> Self {
        Self { root, writer }
    }

    pub fn root(&self) -> &ProjectsRoot {
        &self.root
    }

    /// Lists every project, most recently modified first.
    ///
    /// Never fails: a missing root yields an empty list and entries that
    /// cannot be inspected are skipped.
    pub fn list_projects(&self) -> Vec<ProjectSummary> {
        let root = match std::fs::canonicalize(self.root.path()) {
            Ok(root) => root,
            Err(_) => return Vec::new(),
        };

        let entries = match std::fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %root.display(), error = %e, "cannot list projects root");
                return Vec::new();
            }
        };

        let mut projects = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable project entry");
                    continue;
                }
            };

            let path = entry.path();
            let meta = match std::fs::symlink_metadata(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping project");
                    continue;
                }
            };
            if !meta.is_dir() {
                continue;
            }

            let created_at = meta
                .modified()
                .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
                .unwrap_or_default();

            projects.push(ProjectSummary {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.display().to_string(),
                created_at,
            });
        }

        projects.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });

        tracing::debug!(count = projects.len(), "listed projects");
        projects
    }

    /// Creates project `name` with its starter files.
    ///
    /// If any starter file cannot be written the project directory is
    /// removed before [`ProjectError::ScaffoldFailed`] is returned.
    pub fn create_project(&self, name: &str) -> Result<(), ProjectError> {
        validate_name(name)?;
        let dir = self.root.project_path(name)?;

        if std::fs::symlink_metadata(&dir).is_ok() {
            return Err(ProjectError::AlreadyExists(name.to_string()));
        }

        std::fs::create_dir(&dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => ProjectError::AlreadyExists(name.to_string()),
            _ => ProjectError::Io {
                name: name.to_string(),
                source: e,
            },
        })?;

        for (file, contents) in starter_files(name) {
            if let Err(source) = self.writer.write(&dir.join(file), &contents) {
                tracing::warn!(project = name, file, error = %source, "scaffolding failed, rolling back");
                if let Err(e) = remove_tree(&dir) {
                    tracing::warn!(project = name, error = %e, "rollback left files behind");
                }
                return Err(ProjectError::ScaffoldFailed {
                    name: name.to_string(),
                    file,
                    source,
                });
            }
        }

        tracing::info!(project = name, path = %dir.display(), "created project");
        Ok(())
    }

    /// Deletes project `name` and everything in it.
    pub fn delete_project(&self, name: &str) -> Result<(), ProjectError> {
        let project = self.root.project(name)?;

        remove_tree(project.root()).map_err(|source| ProjectError::DeleteFailed {
            name: name.to_string(),
            source,
        })?;

        tracing::info!(project = name, "deleted project");
        Ok(())
    }
}
