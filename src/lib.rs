//! Listing-Harvest: a polite paginated listing collector
//!
//! This crate walks the numbered pages of a listing catalog, pulls a digit-only
//! identifier attribute out of each page, stops when pagination runs dry, and
//! writes the sorted, de-duplicated identifiers to a delimited file.

pub mod config;
pub mod harvest;
pub mod output;

use thiserror::Error;

/// Main error type for Listing-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] harvest::FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Listing-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{Collector, Identifier, PageOutcome, StopReason};
pub use output::{DelimitedFileSink, HarvestReport, IdSink};
