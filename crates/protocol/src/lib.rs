//! Wire protocol for the studiofs request/response boundary.
//!
//! Every request and reply travels as a JSON [`Message`] envelope. The UI
//! layer names an operation with [`MessageType`], passes its arguments as a
//! camelCase payload, and receives either a `result` reply or an `error`
//! reply carrying an [`ErrorKind`].

pub mod constants;
pub mod envelope;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{ErrorKind, MessageType};
pub use envelope::{Message, WireError};
pub use types::{ClipboardInfo, ClipboardMode, EntryKind, ProjectSummary, TreeEntry};
