//! Error types for the storefront client

use thiserror::Error;

/// Result type alias for storefront operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Storefront client errors
///
/// Only transport and decoding problems are errors here. A server reply with
/// `success: false` is a regular response and is handled by the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be loaded
    #[error(transparent)]
    ConfigFile(#[from] catchy_core::Error),

    /// A header value could not be encoded
    #[error("Invalid value for header {0}")]
    InvalidHeader(String),

    /// Transport failure that did not originate in reqwest
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Check if the request never produced a response
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Transport(_))
    }

    /// Check if the request timed out
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_is_not_transport() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_transport_error() {
        let err = ApiError::transport("connection reset");
        assert!(err.is_transport());
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }
}
