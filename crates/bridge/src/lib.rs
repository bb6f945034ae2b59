//! Request/response boundary for studiofs.
//!
//! Reads newline-delimited JSON [`Message`](studiofs_protocol::Message)
//! requests, dispatches each one to a [`Handler`] on the blocking pool and
//! writes one reply line per request. Requests are handled one at a time,
//! in order.

mod handler;
mod reply;
mod router;
mod server;
mod service;

pub use handler::Handler;
pub use reply::{not_implemented, parse_request, respond, respond_empty};
pub use router::route;
pub use server::{LineServer, ServerConfig};

/// Errors that stop the line server.
///
/// Failures of individual requests never end up here; they are sent back
/// as error replies.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
