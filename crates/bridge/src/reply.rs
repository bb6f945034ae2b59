//! Helpers for turning payloads and results into reply envelopes.

use serde::Serialize;
use serde::de::DeserializeOwned;
use studiofs_protocol::{ErrorKind, Message};
use studiofs_service::ServiceError;

/// Reply for an operation the handler does not support.
pub fn not_implemented(msg: &Message) -> Message {
    msg.reply_error(ErrorKind::NotImplemented, "not implemented")
}

/// Parses the request payload, or returns the `invalid_request` reply to
/// send instead.
pub fn parse_request<T: DeserializeOwned>(msg: &Message) -> Result<T, Message> {
    match msg.parse_payload::<T>() {
        Ok(Some(request)) => Ok(request),
        Ok(None) => Err(msg.reply_error(ErrorKind::InvalidRequest, "missing payload")),
        Err(e) => Err(msg.reply_error(ErrorKind::InvalidRequest, format!("invalid payload: {e}"))),
    }
}

/// Builds the reply for an operation that returns a value.
pub fn respond<T: Serialize>(msg: &Message, result: Result<T, ServiceError>) -> Message {
    match result {
        Ok(value) => encode(msg, Some(&value)),
        Err(e) => error_reply(msg, &e),
    }
}

/// Builds the reply for an operation with no result payload.
pub fn respond_empty(msg: &Message, result: Result<(), ServiceError>) -> Message {
    match result {
        Ok(()) => encode::<()>(msg, None),
        Err(e) => error_reply(msg, &e),
    }
}

fn encode<T: Serialize>(msg: &Message, payload: Option<&T>) -> Message {
    msg.reply(payload).unwrap_or_else(|e| {
        tracing::error!(id = %msg.id, error = %e, "failed to encode reply");
        msg.reply_error(ErrorKind::IoFailure, format!("failed to encode reply: {e}"))
    })
}

fn error_reply(msg: &Message, e: &ServiceError) -> Message {
    let kind = e.kind();
    tracing::warn!(id = %msg.id, op = ?msg.msg_type, ?kind, "request failed: {e}");
    msg.reply_error(kind, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studiofs_protocol::MessageType;
    use studiofs_protocol::messages::PathRequest;
    use studiofs_service::SandboxError;

    fn request(payload: Option<serde_json::Value>) -> Message {
        Message::new("req-1", MessageType::ReadFile, payload.as_ref()).unwrap()
    }

    #[test]
    fn parse_request_reads_payload() {
        let msg = request(Some(serde_json::json!({
            "projectName": "demo",
            "relativePath": "index.html"
        })));
        let req: PathRequest = parse_request(&msg).unwrap();
        assert_eq!(req.project_name, "demo");
        assert_eq!(req.relative_path, "index.html");
    }

    #[test]
    fn missing_payload_is_invalid_request() {
        let reply = parse_request::<PathRequest>(&request(None)).unwrap_err();
        assert_eq!(reply.id, "req-1");
        let err = reply.error.unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidRequest);
        assert_eq!(err.code, 400);
    }

    #[test]
    fn malformed_payload_is_invalid_request() {
        let msg = request(Some(serde_json::json!({"relativePath": 7})));
        let reply = parse_request::<PathRequest>(&msg).unwrap_err();
        assert_eq!(reply.error.unwrap().kind, ErrorKind::InvalidRequest);
    }

    #[test]
    fn respond_serializes_value() {
        let msg = request(None);
        let reply = respond(&msg, Ok(vec!["a", "b"]));
        assert_eq!(reply.msg_type, MessageType::Result);
        assert_eq!(reply.payload.unwrap().get(), r#"["a","b"]"#);
    }

    #[test]
    fn respond_empty_has_no_payload() {
        let reply = respond_empty(&request(None), Ok(()));
        assert_eq!(reply.msg_type, MessageType::Result);
        assert!(reply.payload.is_none());
        assert!(reply.error.is_none());
    }

    #[test]
    fn errors_carry_kind_code_and_message() {
        let err = ServiceError::Sandbox(SandboxError::AccessDenied(
            "path escapes project root: ../x".into(),
        ));
        let reply = respond_empty(&request(None), Err(err));
        assert!(reply.is_error());
        let wire = reply.error.unwrap();
        assert_eq!(wire.kind, ErrorKind::AccessDenied);
        assert_eq!(wire.code, 403);
        assert!(wire.message.contains("escapes"));
    }
}
