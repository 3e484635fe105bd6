//! Core building blocks shared by the Catchy storefront client crates
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every section
//!
//! # Example
//!
//! ```rust,no_run
//! use catchy_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid catchy.toml");
//! println!("Talking to {}", config.schema.server.base_url);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
