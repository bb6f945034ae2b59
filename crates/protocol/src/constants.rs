use serde::{Deserialize, Serialize};

/// Maximum accepted length of a single request line (16 MiB).
///
/// Requests carry whole file contents for `write_file`, so the bound is
/// generous; anything longer is rejected without being parsed.
pub const MAX_REQUEST_SIZE: usize = 16 * 1024 * 1024;

/// Operation identifier carried in the `type` field of every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    // Projects
    #[serde(rename = "list_projects")]
    ListProjects,
    #[serde(rename = "create_project")]
    CreateProject,
    #[serde(rename = "delete_project")]
    DeleteProject,
    #[serde(rename = "list_project_contents")]
    ListProjectContents,

    // Files and folders
    #[serde(rename = "read_file")]
    ReadFile,
    #[serde(rename = "write_file")]
    WriteFile,
    #[serde(rename = "create_file")]
    CreateFile,
    #[serde(rename = "create_folder")]
    CreateFolder,
    #[serde(rename = "delete_path")]
    DeletePath,
    #[serde(rename = "rename")]
    Rename,

    // Clipboard
    #[serde(rename = "copy")]
    Copy,
    #[serde(rename = "cut")]
    Cut,
    #[serde(rename = "paste")]
    Paste,
    #[serde(rename = "get_clipboard")]
    GetClipboard,

    // Health
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "pong")]
    Pong,

    // Replies
    #[serde(rename = "result")]
    Result,
    #[serde(rename = "error")]
    Error,
}

/// Category of a failed operation, carried in the error reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AccessDenied,
    NotFound,
    AlreadyExists,
    NotADirectory,
    ClipboardEmpty,
    InvalidName,
    InvalidDestination,
    InvalidRequest,
    NotText,
    IoFailure,
    DeleteFailed,
    MoveFailed,
    ScaffoldFailed,
    NotImplemented,
}

impl ErrorKind {
    /// HTTP-style status code sent alongside the kind.
    pub fn code(self) -> i32 {
        match self {
            Self::InvalidName | Self::InvalidDestination | Self::InvalidRequest => 400,
            Self::AccessDenied => 403,
            Self::NotFound => 404,
            Self::AlreadyExists | Self::ClipboardEmpty => 409,
            Self::NotText => 415,
            Self::NotADirectory => 422,
            Self::IoFailure | Self::DeleteFailed | Self::MoveFailed | Self::ScaffoldFailed => 500,
            Self::NotImplemented => 501,
        }
    }
}
