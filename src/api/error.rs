//! API Errors
//!
//! Everything that can go wrong between issuing a request and holding a typed
//! value. Backend failures carry the backend's own `message` when it sent one.

use serde::Deserialize;
use thiserror::Error;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, DNS)
    #[error("network error: {0}")]
    Network(String),
    /// 401: token missing, expired or revoked
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// Response arrived but did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// Message from the backend, if it sent one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// What the user sees: the backend's message verbatim, otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }

    /// Like `user_message`, but a bare 401 on a signed-in call means the token expired
    pub fn session_message(&self, fallback: &str, signed_in: bool) -> String {
        match self {
            ApiError::Unauthorized { message: None } if signed_in => SESSION_EXPIRED.to_string(),
            _ => self.user_message(fallback),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_shown_verbatim() {
        let err = ApiError::from_response(409, r#"{"message":"Email already registered"}"#);
        assert_eq!(err, ApiError::Status { status: 409, message: Some("Email already registered".into()) });
        assert_eq!(err.user_message("Failed to save customer"), "Email already registered");
    }

    #[test]
    fn test_fallback_when_no_message() {
        let html = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(html.user_message("Failed to load leaves"), "Failed to load leaves");

        let blank = ApiError::from_response(500, r#"{"message":"  "}"#);
        assert_eq!(blank.backend_message(), None);

        let network = ApiError::Network("fetch failed".into());
        assert_eq!(network.user_message("Failed to load leaves"), "Failed to load leaves");
    }

    #[test]
    fn test_error_field_accepted() {
        let err = ApiError::from_response(400, r#"{"error":"Invalid amount"}"#);
        assert_eq!(err.backend_message(), Some("Invalid amount"));
    }

    #[test]
    fn test_unauthorized_while_signed_in() {
        let err = ApiError::from_response(401, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.session_message("Failed to load loans", true), SESSION_EXPIRED);

        let with_message = ApiError::from_response(401, r#"{"message":"Token revoked"}"#);
        assert_eq!(with_message.session_message("Failed to load loans", true), "Token revoked");
    }

    #[test]
    fn test_failed_login_uses_fallback() {
        let err = ApiError::from_response(401, "");
        assert_eq!(err.user_message("Invalid email or password"), "Invalid email or password");
        assert_eq!(err.session_message("Invalid email or password", false), "Invalid email or password");

        let with_message = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(with_message.session_message("Invalid email or password", false), "Invalid credentials");
    }
}
