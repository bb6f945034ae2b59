use serde::{Deserialize, Serialize};

/// A project directory under the projects root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    /// Absolute path of the project directory.
    pub path: String,
    /// Last-modified time of the directory in milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// Whether a tree entry is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// A node in a project's directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub name: String,
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Present (possibly empty) for folders, absent for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeEntry>>,
}

impl TreeEntry {
    /// Creates a file node.
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            children: None,
        }
    }

    /// Creates a folder node with the given children.
    pub fn folder(name: impl Into<String>, path: impl Into<String>, children: Vec<TreeEntry>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Folder,
            children: Some(children),
        }
    }

    /// Children of a folder; empty for files.
    pub fn children(&self) -> &[TreeEntry] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Whether a clipboard slot duplicates or moves its source on paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// Caller-visible view of the clipboard slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ClipboardInfo {
    Empty,
    #[serde(rename_all = "camelCase")]
    Holding {
        project_name: String,
        relative_path: String,
        mode: ClipboardMode,
    },
}
