//! Run report generation
//!
//! A [`HarvestReport`] is produced at the end of every run, whatever stopped
//! the pagination loop, and printed as a console summary.

use crate::harvest::{Identifier, StopReason};
use chrono::{DateTime, Utc};

/// What happened to the final identifier list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Header plus `rows` identifiers written to `destination`
    Written { destination: String, rows: usize },

    /// Nothing was collected, so nothing was written
    Skipped,

    /// The sink failed; the run still completed
    Failed { destination: String, error: String },
}

/// Summary of one harvest run
#[derive(Debug)]
pub struct HarvestReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Pages requested, including the page that ended the loop
    pub pages_requested: u32,

    /// Pages that contributed identifiers
    pub pages_collected: u32,

    pub stop_reason: StopReason,

    /// Unique identifiers in output order
    pub identifiers: Vec<Identifier>,

    pub write: WriteOutcome,
}

impl HarvestReport {
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// True when pagination ran to its natural end and the output was written
    pub fn is_complete(&self) -> bool {
        self.stop_reason.is_exhausted() && matches!(self.write, WriteOutcome::Written { .. })
    }
}

/// Formats a report as a plain-text summary
pub fn format_report(report: &HarvestReport) -> String {
    let mut out = String::new();

    out.push_str("=== Harvest Summary ===\n\n");
    out.push_str(&format!(
        "Started:           {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Duration:          {:.1}s\n",
        report.duration_seconds()
    ));
    out.push_str(&format!("Pages requested:   {}\n", report.pages_requested));
    out.push_str(&format!("Pages collected:   {}\n", report.pages_collected));
    out.push_str(&format!("Unique identifiers: {}\n", report.identifiers.len()));
    out.push_str(&format!("Stopped on page:   {}\n", report.stop_reason.page()));
    out.push_str(&format!("Stopped because:   {}\n", report.stop_reason));

    match &report.write {
        WriteOutcome::Written { destination, rows } => {
            out.push_str(&format!("Output:            {} ({} rows)\n", destination, rows));
        }
        WriteOutcome::Skipped => {
            out.push_str("Output:            none (no identifiers were harvested)\n");
        }
        WriteOutcome::Failed { destination, error } => {
            out.push_str(&format!("Output:            FAILED writing {}: {}\n", destination, error));
        }
    }

    out
}

/// Prints the report summary to stdout
pub fn print_report(report: &HarvestReport) {
    println!();
    print!("{}", format_report(report));
}
