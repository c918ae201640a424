//! Gateway error type and response-body decoding

use thiserror::Error;

/// Error returned by every gateway operation.
///
/// `Http` carries the backend's own message, decoded by
/// [`decode_error_body`] — callers display it verbatim and never
/// reinterpret why the backend rejected a request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response; `message` is the backend's decoded error text.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Connection, DNS, timeout or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status of a decoded backend rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

/// Decode an error response body into a display message.
///
/// Preference order: JSON `message` field, then `error`, then `errors`
/// (values joined with "; " when it is a field→message map, used as-is
/// when it is a plain string), else the raw body, else `HTTP <status>`.
pub fn decode_error_body(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(errors) = value.get("errors") {
            if let Some(map) = errors.as_object() {
                let joined = map
                    .values()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                if !joined.is_empty() {
                    return joined;
                }
            }
            if let Some(s) = errors.as_str() {
                return s.to_string();
            }
        }
    }

    let raw = body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }

    format!("HTTP {}", status)
}
