//! Apertium Translator - Rust client for the Apertium machine-translation API
//!
//! This library builds query URLs, issues GET requests and decodes the
//! service's JSON responses into typed results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod core;
pub mod cli;

// Re-export key types for convenience
pub use core::{
    client::ApertiumClient,
    config::{ClientConfig, Ready},
    decode::{as_int_array, as_nested_string, as_string, as_string_array},
    errors::{Result, TranslatorError},
    models::LanguagePair,
    params::encode_array,
    text::normalize,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
