//! Line-delimited JSON server.
//!
//! Reads one request per line from any async reader and writes one reply
//! per line to any async writer. The host binary runs it over stdin and
//! stdout.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tokio_util::sync::CancellationToken;

use studiofs_protocol::constants::MAX_REQUEST_SIZE;
use studiofs_protocol::{ErrorKind, Message};

use crate::ServerError;
use crate::handler::Handler;
use crate::router::route;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Longest accepted request line in bytes, excluding the newline.
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_request_size: MAX_REQUEST_SIZE,
        }
    }
}

/// Serves requests for a [`Handler`] over a pair of byte streams.
pub struct LineServer<H: Handler> {
    config: ServerConfig,
    handler: Arc<H>,
    cancel: CancellationToken,
}

impl<H: Handler> LineServer<H> {
    pub fn new(config: ServerConfig, handler: H) -> Self {
        Self {
            config,
            handler: Arc::new(handler),
            cancel: CancellationToken::new(),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Token that stops [`run`](Self::run) when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stops the server after the request in flight, if any, is answered.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Serves requests until the input ends or the server is shut down.
    ///
    /// A malformed or oversized line gets an `invalid_request` reply and the
    /// server keeps going. Only I/O failures on the streams end the loop
    /// with an error.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines =
            FramedRead::new(reader, LinesCodec::new_with_max_length(self.config.max_request_size));
        tracing::info!(max_request_size = self.config.max_request_size, "bridge server ready");

        // After a codec error the stream yields a single `None` before it
        // resumes, which is not the end of input.
        let mut resuming = false;

        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!("server shutting down");
                    break;
                }
                next = lines.next() => next,
            };

            let reply = match next {
                None if resuming => {
                    resuming = false;
                    continue;
                }
                None => {
                    tracing::info!("input closed");
                    break;
                }
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => self.dispatch(line).await,
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    resuming = true;
                    tracing::warn!(
                        max = self.config.max_request_size,
                        "request line too long, discarding"
                    );
                    Message::error(
                        "",
                        ErrorKind::InvalidRequest,
                        format!("request exceeds {} bytes", self.config.max_request_size),
                    )
                }
                Some(Err(LinesCodecError::Io(e))) => return Err(e.into()),
            };

            write_message(&mut writer, &reply).await?;
        }

        Ok(())
    }

    async fn dispatch(&self, line: String) -> Message {
        let msg: Message = match serde_json::from_str(&line) {
            Ok(msg) => msg,
            Err(e) => {
                let id = request_id(&line);
                tracing::warn!(%id, error = %e, "malformed request");
                return Message::error(id, ErrorKind::InvalidRequest, format!("malformed request: {e}"));
            }
        };

        let id = msg.id.clone();
        let handler = Arc::clone(&self.handler);
        match tokio::task::spawn_blocking(move || route(handler.as_ref(), &msg)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(%id, "request handler failed: {e}");
                Message::error(id, ErrorKind::IoFailure, "request handler failed")
            }
        }
    }
}

/// Best-effort id of a request that failed to parse as an envelope.
fn request_id(line: &str) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|v| v.get("id")?.as_str().map(str::to_owned))
        .unwrap_or_default()
}

async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    msg: &Message,
) -> Result<(), ServerError> {
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
