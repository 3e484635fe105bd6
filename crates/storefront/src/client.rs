//! Authenticated request helper

use crate::config::ClientConfig;
use crate::credential::{CookieFile, CredentialSource, EnvToken};
use crate::endpoints::{AdminApi, CartApi, OrdersApi};
use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use catchy_telemetry::{metrics, Timer};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "x-request-id";

/// Content type of form submissions
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Storefront client
///
/// Every request gets:
/// - `Content-Type: application/json` unless the caller supplies its own
/// - `Authorization: Bearer <token>` when the credential source has a token
/// - A fresh `X-Request-ID` for log correlation
///
/// Responses are returned raw; interpreting `success`/`message` is up to the
/// caller.
#[derive(Clone)]
pub struct StorefrontClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
}

impl StorefrontClient {
    /// Create a client from `catchy.toml` and the environment
    ///
    /// The credential comes from the configured cookie file, or else from the
    /// environment variable named like the cookie (`JWT_TOKEN`), read on every
    /// request.
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a client for a specific configuration over HTTP
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);

        let credentials: Arc<dyn CredentialSource> = match config.cookie_file {
            Some(ref path) => Arc::new(CookieFile::new(config.cookie_name.clone(), path.clone())),
            None => Arc::new(EnvToken::new(config.cookie_name.clone())),
        };

        Ok(Self::from_parts(config, transport, credentials))
    }

    /// Assemble a client from explicit parts
    pub fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            credentials,
        }
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access cart endpoints
    #[must_use]
    pub fn cart(&self) -> CartApi {
        CartApi::new(self.clone())
    }

    /// Access order endpoints
    #[must_use]
    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.clone())
    }

    /// Access admin endpoints
    #[must_use]
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request helper
    // -------------------------------------------------------------------------

    /// Build a request with the default headers merged under `headers`
    ///
    /// The credential is looked up here, once per request.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> ApiResult<ApiRequest> {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &headers {
            merged.insert(name.clone(), value.clone());
        }

        if let Some(token) = self.credentials.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
            merged.insert(AUTHORIZATION, value);
        }

        let request_id = Uuid::new_v4().to_string();
        let request_id = HeaderValue::from_str(&request_id)
            .map_err(|_| ApiError::InvalidHeader(X_REQUEST_ID.to_string()))?;
        merged.insert(X_REQUEST_ID, request_id);

        Ok(ApiRequest {
            method,
            path: path.to_string(),
            headers: merged,
            body,
        })
    }

    /// Build and send a request, returning the raw response
    #[instrument(skip(self, headers, body), fields(request_id))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> ApiResult<ApiResponse> {
        let request = self.build_request(method, path, headers, body)?;
        let request_id = request.header(X_REQUEST_ID).unwrap_or_default().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let method = request.method.clone();
        let timer = Timer::start(format!("http.{}", method.as_str().to_lowercase()));
        let start = Instant::now();

        match self.transport.send(request).await {
            Ok(response) => {
                timer.stop();
                debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = response.status,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Request completed"
                );
                Ok(response)
            }
            Err(e) => {
                metrics().increment("http.transport_errors");
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Request failed"
                );
                Err(e)
            }
        }
    }

    /// GET with the default headers
    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::GET, path, HeaderMap::new(), None).await
    }

    /// DELETE with the default headers
    pub async fn delete(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::DELETE, path, HeaderMap::new(), None).await
    }

    /// POST without a body, JSON content type
    pub async fn post_empty(&self, path: &str) -> ApiResult<ApiResponse> {
        self.request(Method::POST, path, HeaderMap::new(), None).await
    }

    /// POST a form-urlencoded body
    pub async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> ApiResult<ApiResponse> {
        self.send_form(Method::POST, path, fields).await
    }

    /// PUT a form-urlencoded body
    pub async fn put_form(&self, path: &str, fields: &[(&str, String)]) -> ApiResult<ApiResponse> {
        self.send_form(Method::PUT, path, fields).await
    }

    async fn send_form(
        &self,
        method: Method,
        path: &str,
        fields: &[(&str, String)],
    ) -> ApiResult<ApiResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
        self.request(method, path, headers, Some(encode_form(fields)))
            .await
    }
}

/// Encode fields as `application/x-www-form-urlencoded`, in order
#[must_use]
pub fn encode_form(fields: &[(&str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (*k, v.as_str())))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{CookieJar, StaticToken};
    use crate::testing::RecordingTransport;

    fn client_with(credentials: Arc<dyn CredentialSource>) -> (StorefrontClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let client = StorefrontClient::from_parts(
            ClientConfig::development(),
            transport.clone(),
            credentials,
        );
        (client, transport)
    }

    #[test]
    fn test_encode_form() {
        let body = encode_form(&[("productId", "42".to_string()), ("quantity", "2".to_string())]);
        assert_eq!(body, "productId=42&quantity=2");

        let body = encode_form(&[("name", "Tea & Cake".to_string())]);
        assert_eq!(body, "name=Tea+%26+Cake");
    }

    #[test]
    fn test_build_request_with_token() {
        let (client, _) = client_with(Arc::new(StaticToken::new("abc")));
        let request = client
            .build_request(Method::GET, "/cart/api/items", HeaderMap::new(), None)
            .unwrap();

        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert!(request.header("x-request-id").is_some());
    }

    #[test]
    fn test_build_request_without_token() {
        let (client, _) = client_with(Arc::new(StaticToken::anonymous()));
        let request = client
            .build_request(Method::DELETE, "/cart/api/remove/1", HeaderMap::new(), None)
            .unwrap();

        assert!(request.header("authorization").is_none());
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let (client, _) = client_with(Arc::new(StaticToken::anonymous()));
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));

        let request = client
            .build_request(Method::POST, "/cart/api/add", headers, None)
            .unwrap();

        assert_eq!(request.header("content-type"), Some(FORM_URLENCODED));
        assert_eq!(request.headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn test_invalid_token_is_an_error() {
        let (client, _) = client_with(Arc::new(StaticToken::new("bad\ntoken")));
        let err = client
            .build_request(Method::GET, "/cart/api/items", HeaderMap::new(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn test_token_read_per_request() {
        let jar = Arc::new(CookieJar::default());
        let (client, transport) = client_with(jar.clone());
        transport.respond_json("[]");
        transport.respond_json("[]");

        client.get("/cart/api/items").await.unwrap();
        jar.set_cookies("JWT_TOKEN=fresh");
        client.get("/cart/api/items").await.unwrap();

        let requests = transport.requests();
        assert!(requests[0].header("authorization").is_none());
        assert_eq!(requests[1].header("authorization"), Some("Bearer fresh"));
    }

    #[tokio::test]
    async fn test_post_form_sets_body_and_content_type() {
        let (client, transport) = client_with(Arc::new(StaticToken::anonymous()));
        transport.respond_json(r#"{"success":true}"#);

        let response = client
            .post_form("/cart/api/add", &[("productId", "7".to_string())])
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.as_deref(), Some("productId=7"));
        assert_eq!(request.header("content-type"), Some(FORM_URLENCODED));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let (client, transport) = client_with(Arc::new(StaticToken::anonymous()));
        transport.fail("connection refused");

        let err = client.get("/cart/api/items").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_env_credential_read_per_request() {
        const NAME: &str = "CATCHY_CLIENT_TEST_TOKEN";
        let config = ClientConfig::development().with_cookie_name(NAME);
        // SAFETY: the variable name is unique to this test
        unsafe { std::env::set_var(NAME, "first") };
        let client = StorefrontClient::with_config(config).unwrap();

        let header = |client: &StorefrontClient| {
            client
                .build_request(Method::GET, "/cart/api/items", HeaderMap::new(), None)
                .unwrap()
                .header("authorization")
                .map(str::to_string)
        };
        assert_eq!(header(&client), Some("Bearer first".to_string()));

        unsafe { std::env::set_var(NAME, "second") };
        assert_eq!(header(&client), Some("Bearer second".to_string()));

        unsafe { std::env::remove_var(NAME) };
        assert_eq!(header(&client), None);
    }

    #[test]
    fn test_client_creation() {
        let client = StorefrontClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
    }
}
