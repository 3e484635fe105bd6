//! Terminal helpers for the Catchy storefront CLI
//!
//! - Status lines and banners
//! - Yes/no confirmation prompts

#![warn(missing_docs)]

pub mod output;
pub mod prompt;
