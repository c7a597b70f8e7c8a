//! Uniform error value surfaced by every API call.
//!
//! ERROR HANDLING
//! ==============
//! Pages render all failures the same way, so the taxonomy is flat: the
//! `Display` output is the message shown to the user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status or an `error` payload.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Client-side input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The response body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a server error from a status code and raw response body.
    ///
    /// Prefers the body's `error` field, then `message`, then a generic
    /// status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = error_message_from_body(body).unwrap_or_else(|| request_failed_message(status));
        Self::Server { status, message }
    }

    /// HTTP status for server errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub(crate) fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Extract a human message from a JSON error body.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .filter(|msg| !msg.trim().is_empty())
        .map(str::to_owned)
}

/// Detect the backend's habit of answering 2xx with `{"error": "..."}`.
pub(crate) fn embedded_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error").and_then(serde_json::Value::as_str).map(str::to_owned)
}
