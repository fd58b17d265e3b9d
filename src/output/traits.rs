//! Output sink traits and error types
//!
//! This module defines the trait interface for identifier sinks.

use crate::harvest::Identifier;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for identifier sinks
///
/// A sink receives the final, sorted identifier list exactly once per run.
pub trait IdSink {
    /// Human-readable description of where the identifiers go
    fn destination(&self) -> String;

    /// Writes a single header cell followed by one identifier per row
    ///
    /// # Arguments
    ///
    /// * `header` - Label for the single column
    /// * `ids` - Identifiers in the order they should appear
    fn write_ids(&self, header: &str, ids: &[Identifier]) -> OutputResult<()>;
}
