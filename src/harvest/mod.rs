//! Harvest module for paginated identifier collection
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching of listing pages
//! - HTML parsing and identifier extraction
//! - The pagination loop and its stop conditions

mod collector;
mod fetcher;
mod identifier;
mod parser;

pub use collector::{Collector, PageOutcome, StopReason};
pub use fetcher::{build_http_client, fetch_page, FetchError, HttpFetcher, PageFetcher};
pub use identifier::{is_valid_identifier, Identifier};
pub use parser::{IdSelector, PageExtraction};

use crate::config::Config;
use crate::output::{DelimitedFileSink, HarvestReport};
use crate::HarvestError;

/// Runs a complete harvest with the default HTTP fetcher and file sink
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Walk listing pages until one is empty, anomalous, or unreachable
/// 3. Write the sorted identifiers to the configured file
///
/// Only setup failures are returned as errors; everything after the first
/// request ends up in the report.
pub async fn harvest(config: &Config) -> Result<HarvestReport, HarvestError> {
    let collector = Collector::from_config(config)?;
    let sink = DelimitedFileSink::from_config(&config.output);
    Ok(collector.run_until(&sink, interrupt_signal()).await)
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::warn!("Interrupt received, finishing up with what was collected");
}
