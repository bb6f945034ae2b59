use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Names a project (`create_project`, `delete_project`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectNameRequest {
    pub name: String,
}

/// Names a project whose tree should be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContentsRequest {
    pub project_name: String,
}

/// Addresses an entry inside a project (`read_file`, `create_file`,
/// `create_folder`, `delete_path`, `copy`, `cut`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    pub project_name: String,
    #[serde(default)]
    pub relative_path: String,
}

/// Replaces a file's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileRequest {
    pub project_name: String,
    pub relative_path: String,
    #[serde(default)]
    pub content: String,
}

/// Renames an entry within its parent folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub project_name: String,
    pub relative_path: String,
    pub new_name: String,
}

/// Pastes the clipboard slot into a destination folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteRequest {
    pub project_name: String,
    #[serde(default)]
    pub destination_relative_path: String,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Text content returned by `read_file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContentResponse {
    pub content: String,
}
