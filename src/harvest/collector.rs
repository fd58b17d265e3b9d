//! Collector - the pagination loop
//!
//! The collector walks listing pages in order, starting from the configured
//! start page, and keeps going while pages yield valid identifiers. Each page
//! step produces a [`PageOutcome`]; the loop ends on the first outcome that is
//! not [`PageOutcome::Collected`] (or on an interrupt), and every way out
//! converges on the same finalize step: sort, then hand the identifiers to the
//! sink if there are any.

use crate::config::{Config, SourceConfig};
use crate::harvest::fetcher::{FetchError, HttpFetcher, PageFetcher};
use crate::harvest::identifier::Identifier;
use crate::harvest::parser::IdSelector;
use crate::output::{HarvestReport, IdSink, WriteOutcome};
use crate::HarvestError;
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Result of harvesting a single page
#[derive(Debug)]
pub enum PageOutcome {
    /// The page yielded at least one valid identifier
    Collected {
        page: u32,
        identifiers: HashSet<Identifier>,
        rejected: usize,
    },

    /// No qualifying elements: the end of pagination
    Exhausted { page: u32 },

    /// Qualifying elements were present but none held a valid identifier
    Anomalous { page: u32, elements: usize },

    /// The page could not be fetched
    FetchFailed { page: u32, error: FetchError },
}

/// Why the pagination loop ended
#[derive(Debug)]
pub enum StopReason {
    /// `page` had no listing elements
    Exhausted { page: u32 },

    /// `page` had listing elements but no valid identifiers
    Anomalous { page: u32 },

    /// `page` could not be fetched
    FetchFailed { page: u32, error: FetchError },

    /// The run was interrupted before `page` completed
    Interrupted { page: u32 },
}

impl StopReason {
    /// The page number the loop stopped on
    pub fn page(&self) -> u32 {
        match self {
            Self::Exhausted { page }
            | Self::Anomalous { page }
            | Self::FetchFailed { page, .. }
            | Self::Interrupted { page } => *page,
        }
    }

    /// True only for the expected end-of-pagination signal
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { page } => write!(
                f,
                "no more listings found, reached the end at page {}",
                page.saturating_sub(1)
            ),
            Self::Anomalous { page } => {
                write!(f, "no valid identifiers found on page {}", page)
            }
            Self::FetchFailed { page, error } => {
                write!(f, "failed to fetch page {}: {}", page, error)
            }
            Self::Interrupted { page } => write!(f, "interrupted while on page {}", page),
        }
    }
}

/// Owns the pagination state and the accumulated identifier set
pub struct Collector<F> {
    source: SourceConfig,
    header: String,
    page_delay: Duration,
    fetcher: F,
    selector: IdSelector,
    identifiers: HashSet<Identifier>,
    pages_requested: u32,
    pages_collected: u32,
}

impl Collector<HttpFetcher> {
    /// Creates a collector that fetches pages over HTTP
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::new(&config.request)?;
        Self::new(config, fetcher)
    }
}

impl<F: PageFetcher> Collector<F> {
    /// Creates a collector around any page fetcher
    pub fn new(config: &Config, fetcher: F) -> Result<Self, HarvestError> {
        let selector = IdSelector::new(&config.source.tag, &config.source.attribute)?;
        tracing::debug!("Selecting identifiers with '{}'", selector.css());

        Ok(Self {
            source: config.source.clone(),
            header: config.output.header.clone(),
            page_delay: config.request.page_delay(),
            fetcher,
            selector,
            identifiers: HashSet::new(),
            pages_requested: 0,
            pages_collected: 0,
        })
    }

    /// Number of unique identifiers collected so far
    pub fn collected(&self) -> usize {
        self.identifiers.len()
    }

    /// Fetches and parses one page, without touching the accumulated set
    pub async fn harvest_page(&mut self, page: u32) -> PageOutcome {
        let url = self.source.page_url(page);
        tracing::info!("Harvesting page {}", page);
        tracing::debug!("URL: {}", url);

        self.pages_requested += 1;

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(error) => return PageOutcome::FetchFailed { page, error },
        };

        let extraction = self.selector.extract(&body);

        if extraction.is_empty() {
            return PageOutcome::Exhausted { page };
        }

        if !extraction.rejected.is_empty() {
            tracing::debug!(
                "Page {}: rejected {} attribute values: {:?}",
                page,
                extraction.rejected.len(),
                extraction.rejected
            );
        }

        if extraction.is_anomalous() {
            return PageOutcome::Anomalous {
                page,
                elements: extraction.elements,
            };
        }

        PageOutcome::Collected {
            page,
            identifiers: extraction.identifiers,
            rejected: extraction.rejected.len(),
        }
    }

    /// Runs the pagination loop until a stop condition, then writes the result
    pub async fn run<S: IdSink>(self, sink: &S) -> HarvestReport {
        self.run_until(sink, std::future::pending::<()>()).await
    }

    /// Like [`Collector::run`], but also stops when `shutdown` resolves
    ///
    /// Identifiers collected before the interrupt are still written.
    pub async fn run_until<S, Sd>(mut self, sink: &S, shutdown: Sd) -> HarvestReport
    where
        S: IdSink,
        Sd: Future,
    {
        let started_at = Utc::now();
        let stop_reason = self.paginate(shutdown).await;

        match &stop_reason {
            StopReason::Exhausted { .. } => tracing::info!("{}", capitalize(&stop_reason)),
            _ => tracing::warn!("{}. Stopping.", capitalize(&stop_reason)),
        }

        let identifiers = self.finish();
        let write = write_identifiers(sink, &self.header, &identifiers);

        HarvestReport {
            started_at,
            finished_at: Utc::now(),
            pages_requested: self.pages_requested,
            pages_collected: self.pages_collected,
            stop_reason,
            identifiers,
            write,
        }
    }

    async fn paginate<Sd: Future>(&mut self, shutdown: Sd) -> StopReason {
        tokio::pin!(shutdown);
        let mut page = self.source.start_page;

        loop {
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => return StopReason::Interrupted { page },
                outcome = self.harvest_page(page) => outcome,
            };

            match outcome {
                PageOutcome::Collected {
                    page: harvested,
                    identifiers,
                    rejected,
                } => {
                    tracing::info!(
                        "Found {} unique identifiers on page {} ({} rejected)",
                        identifiers.len(),
                        harvested,
                        rejected
                    );
                    self.identifiers.extend(identifiers);
                    self.pages_collected += 1;
                }
                PageOutcome::Exhausted { page } => return StopReason::Exhausted { page },
                PageOutcome::Anomalous { page, elements } => {
                    tracing::debug!("Page {} had {} elements, none valid", page, elements);
                    return StopReason::Anomalous { page };
                }
                PageOutcome::FetchFailed { page, error } => {
                    return StopReason::FetchFailed { page, error }
                }
            }

            page = match page.checked_add(1) {
                Some(next) => next,
                None => return StopReason::Exhausted { page },
            };

            tokio::select! {
                biased;
                _ = &mut shutdown => return StopReason::Interrupted { page },
                _ = tokio::time::sleep(self.page_delay) => {}
            }
        }
    }

    /// Drains the accumulated set into lexicographic order
    fn finish(&mut self) -> Vec<Identifier> {
        let mut identifiers: Vec<Identifier> = self.identifiers.drain().collect();
        identifiers.sort();
        identifiers
    }
}

fn write_identifiers<S: IdSink>(
    sink: &S,
    header: &str,
    identifiers: &[Identifier],
) -> WriteOutcome {
    if identifiers.is_empty() {
        tracing::info!("No identifiers were harvested.");
        return WriteOutcome::Skipped;
    }

    let destination = sink.destination();
    tracing::info!(
        "Harvest complete. Found a total of {} unique identifiers.",
        identifiers.len()
    );
    tracing::info!("Saving results to {}...", destination);

    match sink.write_ids(header, identifiers) {
        Ok(()) => {
            tracing::info!("Successfully saved identifiers to {}", destination);
            WriteOutcome::Written {
                destination,
                rows: identifiers.len(),
            }
        }
        Err(e) => {
            tracing::error!("Error writing to {}: {}", destination, e);
            WriteOutcome::Failed {
                destination,
                error: e.to_string(),
            }
        }
    }
}

fn capitalize(reason: &StopReason) -> String {
    let text = reason.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}
