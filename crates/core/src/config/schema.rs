//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Server connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the bearer credential comes from
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Feedback timing
    #[serde(default)]
    pub ui: UiConfig,
}

/// Server connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin of the storefront server, e.g. `http://localhost:8080`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Credential lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Cookie holding the bearer token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Cookie file read on every request
    #[serde(default)]
    pub cookie_file: Option<String>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_file: None,
        }
    }
}

fn default_cookie_name() -> String {
    "JWT_TOKEN".to_string()
}

/// Banner and navigation timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a banner stays on screen
    #[serde(default = "default_banner_ms")]
    pub banner_ms: u64,

    /// Delay between a success banner and the follow-up navigation
    #[serde(default = "default_navigation_delay_ms")]
    pub navigation_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            banner_ms: default_banner_ms(),
            navigation_delay_ms: default_navigation_delay_ms(),
        }
    }
}

fn default_banner_ms() -> u64 {
    3000
}

fn default_navigation_delay_ms() -> u64 {
    1500
}
