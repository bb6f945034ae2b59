use studiofs_clipboard::Clipboard;
use studiofs_file_ops::{self as file_ops, TreeOptions};
use studiofs_projects::{FsTemplateWriter, ProjectStore, TemplateWriter};
use studiofs_protocol::{ClipboardInfo, ProjectSummary, TreeEntry};
use studiofs_sandbox::{PathResolver, ProjectsRoot, SandboxError, validate_name};

use crate::ServiceError;

/// Owns all studiofs state for one process.
pub struct StudioService<W = FsTemplateWriter> {
    store: ProjectStore<W>,
    clipboard: Clipboard,
    tree: TreeOptions,
}

impl StudioService<FsTemplateWriter> {
    pub fn new(root: ProjectsRoot, tree: TreeOptions) -> Self {
        Self::from_parts(ProjectStore::new(root), Clipboard::new(), tree)
    }
}

impl<W: TemplateWriter> StudioService<W> {
    pub fn from_parts(store: ProjectStore<W>, clipboard: Clipboard, tree: TreeOptions) -> Self {
        Self {
            store,
            clipboard,
            tree,
        }
    }

    pub fn projects_root(&self) -> &ProjectsRoot {
        self.store.root()
    }

    // -- Projects ----------------------------------------------------------

    pub fn list_projects(&self) -> Vec<ProjectSummary> {
        self.store.list_projects()
    }

    pub fn create_project(&self, name: &str) -> Result<(), ServiceError> {
        Ok(self.store.create_project(name)?)
    }

    /// Deletes a project. A clipboard entry taken from it is dropped.
    pub fn delete_project(&self, name: &str) -> Result<(), ServiceError> {
        self.store.delete_project(name)?;
        self.clipboard.clear_project(name);
        Ok(())
    }

    /// Lists a project's tree. A project that does not exist lists as empty.
    pub fn list_project_contents(&self, name: &str) -> Result<Vec<TreeEntry>, ServiceError> {
        validate_name(name)?;
        match self.projects_root().project(name) {
            Ok(resolver) => Ok(file_ops::list_tree(&resolver, self.tree)),
            Err(SandboxError::ProjectNotFound(_)) => {
                tracing::debug!(project = name, "listing missing project as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    // -- Files and folders -------------------------------------------------

    pub fn read_file(&self, project: &str, relative: &str) -> Result<String, ServiceError> {
        Ok(file_ops::read_file(&self.project(project)?, relative)?)
    }

    pub fn write_file(
        &self,
        project: &str,
        relative: &str,
        content: &str,
    ) -> Result<(), ServiceError> {
        Ok(file_ops::write_file(&self.project(project)?, relative, content)?)
    }

    pub fn create_file(&self, project: &str, relative: &str) -> Result<(), ServiceError> {
        Ok(file_ops::create_file(&self.project(project)?, relative)?)
    }

    pub fn create_folder(&self, project: &str, relative: &str) -> Result<(), ServiceError> {
        Ok(file_ops::create_folder(&self.project(project)?, relative)?)
    }

    pub fn delete_path(&self, project: &str, relative: &str) -> Result<(), ServiceError> {
        Ok(file_ops::delete_path(&self.project(project)?, relative)?)
    }

    pub fn rename(&self, project: &str, relative: &str, new_name: &str) -> Result<(), ServiceError> {
        Ok(file_ops::rename(&self.project(project)?, relative, new_name)?)
    }

    // -- Clipboard ---------------------------------------------------------

    pub fn copy(&self, project: &str, relative: &str) -> Result<(), ServiceError> {
        Ok(self.clipboard.copy(self.projects_root(), project, relative)?)
    }

    pub fn cut(&self, project: &str, relative: &str) -> Result<(), ServiceError> {
        Ok(self.clipboard.cut(self.projects_root(), project, relative)?)
    }

    pub fn paste(&self, project: &str, destination: &str) -> Result<(), ServiceError> {
        Ok(self.clipboard.paste(self.projects_root(), project, destination)?)
    }

    pub fn clipboard(&self) -> ClipboardInfo {
        ClipboardInfo::from(&self.clipboard.state())
    }

    fn project(&self, name: &str) -> Result<PathResolver, ServiceError> {
        Ok(self.projects_root().project(name)?)
    }
}
