//! Configuration for the storefront client
//!
//! Values come from `catchy.toml` (see [`catchy_core::config`]) and are then
//! overridden by environment variables.

use crate::credential::DEFAULT_COOKIE_NAME;
use crate::error::{ApiError, ApiResult};
use catchy_core::config::{Config, ConfigSchema};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local development server
const DEVELOPMENT_BASE_URL: &str = "http://localhost:8080";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development server
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `CATCHY_ENV` environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("CATCHY_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server origin; endpoint paths are appended to it
    pub base_url: String,
    /// Request timeout
    #[serde(with = "millis")]
    pub timeout: Duration,
    /// Cookie holding the bearer token
    pub cookie_name: String,
    /// Cookie file consulted on every request
    pub cookie_file: Option<PathBuf>,
    /// How long a banner stays visible
    #[serde(with = "millis")]
    pub banner_duration: Duration,
    /// Pause between a success banner and the follow-up navigation
    #[serde(with = "millis")]
    pub navigation_delay: Duration,
    /// Current environment
    pub environment: Environment,
}

mod millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_schema(&ConfigSchema::default())
    }
}

impl ClientConfig {
    /// Build from a parsed `catchy.toml`
    #[must_use]
    pub fn from_schema(schema: &ConfigSchema) -> Self {
        Self {
            base_url: schema.server.base_url.clone(),
            timeout: Duration::from_secs(schema.server.timeout_secs),
            cookie_name: schema.credentials.cookie_name.clone(),
            cookie_file: schema.credentials.cookie_file.as_ref().map(PathBuf::from),
            banner_duration: Duration::from_millis(schema.ui.banner_ms),
            navigation_delay: Duration::from_millis(schema.ui.navigation_delay_ms),
            environment: Environment::default(),
        }
    }

    /// Load `catchy.toml` (explicit path or standard locations) and apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> ApiResult<Self> {
        let file = Config::load(path)?;
        Ok(Self::from_schema(&file.schema).with_env_overrides())
    }

    /// Create configuration from the standard config file locations and
    /// environment variables
    ///
    /// Reads the following environment variables:
    /// - `CATCHY_BASE_URL`: Server origin
    /// - `CATCHY_TIMEOUT_SECS`: Request timeout in seconds
    /// - `CATCHY_COOKIE_FILE`: Cookie file holding the credential
    /// - `CATCHY_ENV`: Environment (development/staging/production)
    pub fn from_env() -> ApiResult<Self> {
        Self::load(None)
    }

    fn with_env_overrides(mut self) -> Self {
        self.environment = Environment::from_env();

        if self.environment == Environment::Development {
            self.base_url = DEVELOPMENT_BASE_URL.to_string();
            self.timeout = Duration::from_secs(10);
        }

        if let Ok(url) = env::var("CATCHY_BASE_URL") {
            self.base_url = url;
        }

        if let Some(timeout) = env::var("CATCHY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.timeout = Duration::from_secs(timeout);
        }

        if let Ok(path) = env::var("CATCHY_COOKIE_FILE") {
            self.cookie_file = Some(PathBuf::from(path));
        }

        self
    }

    /// Create development configuration (local server)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEVELOPMENT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the credential cookie name
    #[must_use]
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Builder-style method to set the cookie file
    #[must_use]
    pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    /// Builder-style method to set banner display time
    #[must_use]
    pub fn with_banner_duration(mut self, duration: Duration) -> Self {
        self.banner_duration = duration;
        self
    }

    /// Builder-style method to set the post-success navigation delay
    #[must_use]
    pub fn with_navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.cookie_name.is_empty() {
            return Err(ApiError::config("cookie_name cannot be empty"));
        }

        Ok(())
    }
}
