//! Authenticated client and UI feedback layer for the Catchy storefront
//!
//! Every user action on the storefront (cart changes, checkout, admin product
//! management) maps to exactly one REST call. This crate provides:
//!
//! - **Credential accessor**: reads the `JWT_TOKEN` credential fresh for every request
//! - **Request helper**: consistent `Content-Type`, `Authorization` and correlation headers
//! - **Endpoint APIs**: typed wrappers for the cart, order and admin endpoints
//! - **Actions**: one async function per UI action, rendering banners and
//!   navigations through an injected [`Page`]
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catchy_storefront::{MemoryPage, Storefront, StorefrontClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StorefrontClient::new()?;
//!     let page = Arc::new(MemoryPage::from_config(client.config()));
//!     let storefront = Storefront::new(client, page.clone());
//!
//!     storefront.on_page_load().await;
//!     storefront.add_to_cart(42, 2).await;
//!
//!     for banner in page.banners() {
//!         println!("[{}] {}", banner.severity, banner.text);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod client;
pub mod config;
pub mod credential;
pub mod endpoints;
pub mod error;
pub mod page;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::{ActionOutcome, Storefront};
pub use client::StorefrontClient;
pub use config::{ClientConfig, Environment};
pub use credential::{CookieFile, CookieJar, CredentialSource, EnvToken, StaticToken};
pub use error::{ApiError, ApiResult};
pub use page::{Banner, BannerStack, CartCounter, MemoryPage, Page, PageEvent, Severity};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::actions::{ActionOutcome, Storefront};
    pub use crate::client::StorefrontClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::credential::{CookieFile, CookieJar, CredentialSource, EnvToken, StaticToken};
    pub use crate::endpoints::{AdminApi, CartApi, OrdersApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::page::{Banner, MemoryPage, Page, Severity};
}
