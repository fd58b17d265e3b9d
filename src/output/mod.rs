//! Output module for persisting harvested identifiers
//!
//! This module handles:
//! - Writing the final identifier list to a delimited file
//! - Summarising a run for the console

mod delimited;
pub mod report;
mod traits;

pub use delimited::{write_row, DelimitedFileSink};
pub use report::{format_report, print_report, HarvestReport, WriteOutcome};
pub use traits::{IdSink, OutputError, OutputResult};
