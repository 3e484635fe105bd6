//! The `{success, message}` envelope shared by every mutating endpoint

use crate::error::ApiResult;
use crate::transport::ApiResponse;
use serde::{Deserialize, Serialize};

/// Keyword the server puts in messages that require signing in
const LOGIN_KEYWORD: &str = "login";

/// Result envelope of a mutating call
///
/// A missing `success` reads as failure; a missing, `null` or empty
/// `message` as no message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Whether the server applied the change
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome, shown verbatim on failure
    #[serde(default)]
    pub message: Option<String>,
    /// HTTP status the envelope arrived with
    #[serde(skip)]
    pub status: u16,
}

impl ActionResponse {
    /// Decode the envelope from a raw response
    pub fn from_response(response: &ApiResponse) -> ApiResult<Self> {
        let mut envelope: Self = response.json()?;
        envelope.status = response.status;
        Ok(envelope)
    }

    /// Server message, or `fallback` when there is none
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Whether the failure means the user has to sign in first
    ///
    /// A 401 status is authoritative. The server currently answers 200 with
    /// "Please login first", so the message keyword is checked as well.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        if self.success {
            return false;
        }
        self.status == 401
            || self
                .message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(LOGIN_KEYWORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_defaults() {
        let response = ApiResponse::new(200, "{}");
        let envelope = ActionResponse::from_response(&response).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, None);
        assert_eq!(envelope.status, 200);
    }

    #[test]
    fn test_null_message_uses_fallback() {
        let response = ApiResponse::new(200, r#"{"success":false,"message":null}"#);
        let envelope = ActionResponse::from_response(&response).unwrap();
        assert_eq!(envelope.message_or("Error updating cart"), "Error updating cart");
    }

    #[test]
    fn test_empty_message_uses_fallback() {
        let envelope = ActionResponse {
            message: Some(String::new()),
            ..ActionResponse::default()
        };
        assert_eq!(envelope.message_or("Error removing item"), "Error removing item");
    }

    #[test]
    fn test_server_message_wins() {
        let envelope = ActionResponse {
            message: Some("Insufficient stock".to_string()),
            ..ActionResponse::default()
        };
        assert_eq!(envelope.message_or("Error placing order"), "Insufficient stock");
    }

    #[test]
    fn test_requires_login() {
        let by_message = ActionResponse {
            message: Some("Please login first".to_string()),
            status: 200,
            ..ActionResponse::default()
        };
        assert!(by_message.requires_login());

        let by_status = ActionResponse {
            status: 401,
            ..ActionResponse::default()
        };
        assert!(by_status.requires_login());

        let other = ActionResponse {
            message: Some("Product not found".to_string()),
            status: 200,
            ..ActionResponse::default()
        };
        assert!(!other.requires_login());
    }

    #[test]
    fn test_login_keyword_ignores_case() {
        let expired = ActionResponse {
            message: Some("Login expired".to_string()),
            status: 200,
            ..ActionResponse::default()
        };
        assert!(expired.requires_login());

        let shouting = ActionResponse {
            message: Some("PLEASE LOGIN".to_string()),
            status: 200,
            ..ActionResponse::default()
        };
        assert!(shouting.requires_login());

        let succeeded = ActionResponse {
            success: true,
            message: Some("Logged in, login ok".to_string()),
            status: 200,
        };
        assert!(!succeeded.requires_login());
    }
}
