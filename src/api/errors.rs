use serde_json::Value;
use std::fmt;

/// Fallback message when an HTTP error body names no reason.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";
/// Message surfaced for transport-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
/// Message surfaced when a response body is not JSON.
pub const PARSE_ERROR_MESSAGE: &str = "Invalid response from server";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Http,
    Parse,
    Serialization,
}

/// Normalized failure returned by the request dispatcher. `status` is set whenever the
/// failure came from an HTTP response; `data` carries the parsed body when there was one.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorEnvelope {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub data: Option<Value>,
    pub message: String,
}

impl ErrorEnvelope {
    /// Builds an HTTP failure, taking the message from the body's `error`, `detail` or
    /// `message` field.
    #[must_use]
    pub fn http(status: u16, data: Value) -> Self {
        let message = body_message(&data).unwrap_or(DEFAULT_FAILURE_MESSAGE).to_string();
        Self {
            kind: FailureKind::Http,
            status: Some(status),
            data: Some(data),
            message,
        }
    }

    #[must_use]
    pub fn network() -> Self {
        Self {
            kind: FailureKind::Network,
            status: None,
            data: None,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self {
            kind: FailureKind::Timeout,
            status: None,
            data: None,
            message: "Request timed out. Please try again.".to_string(),
        }
    }

    #[must_use]
    pub fn parse(status: u16) -> Self {
        Self {
            kind: FailureKind::Parse,
            status: Some(status),
            data: None,
            message: PARSE_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Serialization,
            status: None,
            data: None,
            message: message.into(),
        }
    }

    /// True when the failure carries per-field validation data (a 400 with an object body).
    #[must_use]
    pub fn has_field_errors(&self) -> bool {
        self.status == Some(400) && matches!(self.data, Some(Value::Object(_)))
    }
}

fn body_message(data: &Value) -> Option<&str> {
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| {
            data.get(key)
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        })
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.status) {
            (FailureKind::Http | FailureKind::Parse, Some(status)) => {
                write!(formatter, "Request failed ({status}): {}", self.message)
            }
            (FailureKind::Timeout, _) => write!(formatter, "Timeout: {}", self.message),
            (FailureKind::Serialization, _) => {
                write!(formatter, "Request error: {}", self.message)
            }
            _ => write!(formatter, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn http_message_prefers_error_then_detail_then_message() {
        let envelope = ErrorEnvelope::http(
            401,
            json!({"error": "Invalid credentials", "detail": "ignored"}),
        );
        assert_eq!(envelope.message, "Invalid credentials");

        let envelope = ErrorEnvelope::http(403, json!({"detail": "Forbidden"}));
        assert_eq!(envelope.message, "Forbidden");

        let envelope = ErrorEnvelope::http(409, json!({"message": "Exists"}));
        assert_eq!(envelope.message, "Exists");
    }

    #[test]
    fn http_message_falls_back_for_field_errors() {
        let envelope = ErrorEnvelope::http(400, json!({"username": ["Taken."]}));
        assert_eq!(envelope.message, DEFAULT_FAILURE_MESSAGE);
        assert_eq!(envelope.status, Some(400));
        assert!(envelope.has_field_errors());
    }

    #[test]
    fn non_string_reason_is_ignored() {
        let envelope = ErrorEnvelope::http(500, json!({"error": {"code": 1}}));
        assert_eq!(envelope.message, DEFAULT_FAILURE_MESSAGE);
        assert!(!envelope.has_field_errors());
    }

    #[test]
    fn network_failure_has_no_status() {
        let envelope = ErrorEnvelope::network();
        assert_eq!(envelope.status, None);
        assert_eq!(envelope.to_string(), NETWORK_ERROR_MESSAGE);
    }
}
