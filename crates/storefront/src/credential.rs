//! Credential accessor
//!
//! The bearer token lives in a cookie (`JWT_TOKEN` by default). Sources are
//! queried once per request and never cache the token, so a login or logout
//! between two calls is picked up by the second one.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Cookie the server issues the bearer token under
pub const DEFAULT_COOKIE_NAME: &str = "JWT_TOKEN";

/// Something that can hand out the current bearer token
pub trait CredentialSource: Send + Sync {
    /// Current token, or `None` when the user is not signed in
    fn token(&self) -> Option<String>;
}

/// Find a cookie value in a `name=value; other=value` string.
///
/// Newlines are accepted as separators too, so a file with one cookie per
/// line parses the same way. Empty values count as absent.
#[must_use]
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split([';', '\n'])
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// In-memory cookie string, the equivalent of `document.cookie`
#[derive(Debug)]
pub struct CookieJar {
    name: String,
    cookies: RwLock<String>,
}

impl CookieJar {
    /// Empty jar looking for the given cookie name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cookies: RwLock::new(String::new()),
        }
    }

    /// Replace the whole cookie string
    pub fn set_cookies(&self, cookies: impl Into<String>) {
        *self.cookies.write().unwrap_or_else(PoisonError::into_inner) = cookies.into();
    }

    /// Drop every cookie
    pub fn clear(&self) {
        self.set_cookies(String::new());
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME)
    }
}

impl CredentialSource for CookieJar {
    fn token(&self) -> Option<String> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        find_cookie(&cookies, &self.name)
    }
}

/// Cookie file re-read on every request
///
/// Accepts a `Cookie:` header value or one `name=value` per line. A missing
/// or unreadable file means no credential.
#[derive(Debug, Clone)]
pub struct CookieFile {
    name: String,
    path: PathBuf,
}

impl CookieFile {
    /// Read `name` from the file at `path`
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl CredentialSource for CookieFile {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => find_cookie(&content, &self.name),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Cookie file unreadable");
                None
            }
        }
    }
}

/// Environment variable read on every request
///
/// Unset or empty means no credential.
#[derive(Debug, Clone)]
pub struct EnvToken {
    name: String,
}

impl EnvToken {
    /// Read the variable `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CredentialSource for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.name)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

/// Fixed token, e.g. passed on the command line
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Token that is always present (empty strings count as absent)
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self((!token.is_empty()).then_some(token))
    }

    /// No credential at all
    #[must_use]
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
