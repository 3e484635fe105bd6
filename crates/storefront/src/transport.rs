//! HTTP transport
//!
//! [`Transport`] is the seam between request construction and the network.
//! [`HttpTransport`] sends over `reqwest`; tests swap in a recording fake.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

/// A fully built request, relative to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path, e.g. `/cart/api/add`
    pub path: String,
    /// Final header set
    pub headers: HeaderMap,
    /// Encoded body, if any
    pub body: Option<String>,
}

impl ApiRequest {
    /// Header value as text, if present and valid UTF-8
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Raw response: status and body, uninterpreted
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl ApiResponse {
    /// Build a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON regardless of status
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(ApiError::Json)
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests; implementations own connection handling only
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return whatever the server answered
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

/// `reqwest`-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    inner: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport for the configured server
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("catchy-storefront/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.config.url(&request.path);

        let mut builder = self
            .inner
            .request(request.method, &url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json_ignores_status() {
        let response = ApiResponse::new(500, r#"{"success":false,"message":"boom"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert!(!response.is_success());
        assert_eq!(value["message"], "boom");
    }

    #[test]
    fn test_response_json_rejects_html() {
        let response = ApiResponse::new(200, "<html>login</html>");
        assert!(response.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn test_transport_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("localhost");
        assert!(HttpTransport::new(&config).is_err());
    }

    #[test]
    fn test_transport_creation() {
        assert!(HttpTransport::new(&ClientConfig::development()).is_ok());
    }
}
