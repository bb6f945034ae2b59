use studiofs_protocol::{ErrorKind, Message, MessageType};

use crate::handler::Handler;

/// Dispatches a request to the matching [`Handler`] method and returns the
/// reply.
pub fn route<H: Handler + ?Sized>(handler: &H, msg: &Message) -> Message {
    tracing::debug!(id = %msg.id, op = ?msg.msg_type, "routing request");

    match msg.msg_type {
        MessageType::ListProjects => handler.on_list_projects(msg),
        MessageType::CreateProject => handler.on_create_project(msg),
        MessageType::DeleteProject => handler.on_delete_project(msg),
        MessageType::ListProjectContents => handler.on_list_project_contents(msg),
        MessageType::ReadFile => handler.on_read_file(msg),
        MessageType::WriteFile => handler.on_write_file(msg),
        MessageType::CreateFile => handler.on_create_file(msg),
        MessageType::CreateFolder => handler.on_create_folder(msg),
        MessageType::DeletePath => handler.on_delete_path(msg),
        MessageType::Rename => handler.on_rename(msg),
        MessageType::Copy => handler.on_copy(msg),
        MessageType::Cut => handler.on_cut(msg),
        MessageType::Paste => handler.on_paste(msg),
        MessageType::GetClipboard => handler.on_get_clipboard(msg),
        MessageType::Ping => handler.on_ping(msg),
        MessageType::Pong | MessageType::Result | MessageType::Error => msg.reply_error(
            ErrorKind::InvalidRequest,
            format!("{:?} is a reply type and cannot be sent as a request", msg.msg_type),
        ),
    }
}
