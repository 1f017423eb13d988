use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of API errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Bad credentials, expired or absent token.
    Auth,
    /// HTTP status error (4xx, 5xx) outside the auth flows.
    HttpStatus,
    /// Unreachable host, timeout, connection reset.
    Network,
    /// Response is not the expected structure.
    Shape,
    /// Local durable storage failed (session file I/O).
    Storage,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Auth => write!(f, "auth"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Shape => write!(f, "shape"),
            ApiErrorKind::Storage => write!(f, "storage"),
        }
    }
}

/// Structured error from the remote store with kind and details.
///
/// `message` is always suitable for direct display to the user; the raw
/// response body, when useful, goes into `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category.
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// Optional additional details (e.g., raw error body).
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, preferring the server's `detail` string
    /// when the body is a JSON object carrying one.
    pub fn http_status(status: u16, body: &str) -> Self {
        match server_detail(body) {
            Some(detail) => Self {
                kind: ApiErrorKind::HttpStatus,
                message: detail,
                details: Some(body.to_string()),
            },
            None => Self {
                kind: ApiErrorKind::HttpStatus,
                message: format!("HTTP {status}"),
                details: (!body.is_empty()).then(|| body.to_string()),
            },
        }
    }

    /// Creates an authentication error from a rejected auth exchange.
    /// Falls back to `fallback` when the server provided no detail string.
    pub fn auth_status(body: &str, fallback: &str) -> Self {
        Self {
            kind: ApiErrorKind::Auth,
            message: server_detail(body).unwrap_or_else(|| fallback.to_string()),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates an auth error with a fixed message (e.g., fail-closed "who am
    /// I" resolution).
    pub fn not_authenticated() -> Self {
        Self::new(ApiErrorKind::Auth, "Not authenticated")
    }

    /// Wraps a transport-level failure (connect, timeout, body read).
    pub fn network(err: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: "Could not reach the library service".to_string(),
            details: Some(err.to_string()),
        }
    }

    /// Wraps a local persistence failure.
    pub fn storage(err: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Storage,
            message: "Could not update the stored session".to_string(),
            details: Some(err.to_string()),
        }
    }

    /// Creates a data-shape error for an unexpected response structure.
    pub fn shape(context: &str, err: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Shape,
            message: format!("Unexpected response for {context}"),
            details: Some(err.to_string()),
        }
    }
}

/// Extracts FastAPI's `{"detail": ...}` message from an error body.
fn server_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_prefers_server_detail() {
        let err = ApiError::http_status(400, r#"{"detail": "Email already registered"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.message, "Email already registered");
    }

    #[test]
    fn http_status_falls_back_to_code() {
        let err = ApiError::http_status(502, "<html>bad gateway</html>");
        assert_eq!(err.message, "HTTP 502");
        assert!(err.details.unwrap().contains("bad gateway"));
    }

    #[test]
    fn auth_status_uses_fallback_without_detail() {
        let err = ApiError::auth_status("", "Could not sign in");
        assert_eq!(err.kind, ApiErrorKind::Auth);
        assert_eq!(err.message, "Could not sign in");
        assert!(err.details.is_none());
    }

    #[test]
    fn non_string_detail_is_stringified() {
        let err = ApiError::http_status(422, r#"{"detail": [{"loc": ["body"]}]}"#);
        assert!(err.message.contains("loc"));
    }
}
