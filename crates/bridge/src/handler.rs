//! Handler trait for processing boundary requests.
//!
//! Implementors provide the domain logic while the server handles framing,
//! routing and the blocking pool. Every method receives the parsed request
//! envelope and returns the reply envelope.
//!
//! Default implementations reply with "not implemented" so handlers only
//! need to override the operations they support.

use studiofs_protocol::Message;

use crate::reply::not_implemented;

/// Trait for handling requests from the UI layer.
///
/// Methods are synchronous and may block on filesystem I/O; the server runs
/// them on tokio's blocking pool.
pub trait Handler: Send + Sync + 'static {
    /// Called for `list_projects`.
    fn on_list_projects(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `create_project`.
    fn on_create_project(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `delete_project`.
    fn on_delete_project(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `list_project_contents`.
    fn on_list_project_contents(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `read_file`.
    fn on_read_file(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `write_file`.
    fn on_write_file(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `create_file`.
    fn on_create_file(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `create_folder`.
    fn on_create_folder(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `delete_path`.
    fn on_delete_path(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `rename`.
    fn on_rename(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `copy`.
    fn on_copy(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `cut`.
    fn on_cut(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `paste`.
    fn on_paste(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `get_clipboard`.
    fn on_get_clipboard(&self, msg: &Message) -> Message {
        not_implemented(msg)
    }

    /// Called for `ping`.
    fn on_ping(&self, msg: &Message) -> Message {
        Message {
            id: msg.id.clone(),
            msg_type: studiofs_protocol::MessageType::Pong,
            payload: None,
            error: None,
        }
    }
}
