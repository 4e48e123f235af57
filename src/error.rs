//! Error categories for backend communication.
//!
//! Services never catch: every failure bubbles up as an [`ApiError`] and the
//! calling store decides how to surface it (store-local message + `Err`).

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// 4xx response. `message` is the server's `error` envelope field if any.
    #[error("client error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Client { status: u16, message: Option<String> },

    /// 5xx response.
    #[error("server error (HTTP {status}): {}", message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    /// The response body was not the JSON shape we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Durable session storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// An advisory client-side guard refused the action before any request.
    #[error("{0}")]
    Precondition(String),

    #[error("client not configured: {0}")]
    NotConfigured(String),
}

impl ApiError {
    /// HTTP status carried by the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The server-supplied message from the `{ "error": ... }` envelope.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Client { message, .. } | ApiError::Server { message, .. } => {
                message.as_deref()
            }
            ApiError::Precondition(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Message a store records for `err`: the server's own text, else `fallback`.
pub fn user_message(err: &ApiError, fallback: &str) -> String {
    err.server_message()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_envelope() {
        let err = ApiError::Client {
            status: 400,
            message: Some("requested amount must be greater than 0".into()),
        };
        assert_eq!(
            user_message(&err, "Lỗi tạo yêu cầu bàn giao"),
            "requested amount must be greater than 0"
        );
    }

    #[test]
    fn falls_back_when_envelope_missing() {
        let err = ApiError::Server {
            status: 502,
            message: None,
        };
        assert_eq!(user_message(&err, "Lỗi tải ca"), "Lỗi tải ca");
        let err = ApiError::Network("connection refused".into());
        assert_eq!(user_message(&err, "Lỗi tải ca"), "Lỗi tải ca");
    }

    #[test]
    fn blank_envelope_uses_fallback() {
        let err = ApiError::Client {
            status: 422,
            message: Some("   ".into()),
        };
        assert_eq!(user_message(&err, "fallback"), "fallback");
    }

    #[test]
    fn not_found_detection() {
        let err = ApiError::Client {
            status: 404,
            message: None,
        };
        assert!(err.is_not_found());
        assert!(!ApiError::Network("x".into()).is_not_found());
        assert_eq!(
            ApiError::Server {
                status: 500,
                message: None
            }
            .status(),
            Some(500)
        );
    }
}
