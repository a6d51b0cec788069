//! Metrics Collectors
//!
//! One collector per modem page. Each collector fetches its page, hands the HTML to the
//! matching parser, and applies the typed result to the Prometheus metrics.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` containing shared state
//! - Fetch the page through the `ModemClient`
//! - Parse it and update metrics as one batch
//! - Return a `CollectionStatus` (`Success`, or `Failed` with the reason)
//!
//! [`poll_once`] runs both collectors in sequence and summarizes the cycle as a
//! [`PollOutcome`].
//!
//! # Error Handling
//!
//! Individual collector failures are non-fatal - they log warnings and return
//! `CollectionStatus::Failed`. A failed page keeps its last values (stale but
//! available) until a later poll succeeds.

use crate::config::MIN_SLEEP_FLOOR;
use crate::metrics::MetricsCollector;
use crate::surfboard::ModemClient;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Shared context passed to all collectors
///
/// This struct uses public fields for ergonomic access patterns.
/// All fields are immutable references, so no invariants can be violated.
#[derive(Clone, Copy)]
pub struct CollectionContext<'a> {
    /// Modem client for fetching pages
    pub client: &'a ModemClient,
    /// Metrics collector for updating Prometheus metrics
    pub metrics: &'a MetricsCollector,
}

/// Status of a metrics collection operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionStatus {
    /// Metrics were successfully collected and updated
    Success,
    /// Collection failed but is non-fatal (already logged as warning)
    Failed { reason: String },
}

impl CollectionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, CollectionStatus::Success)
    }
}

/// Helper to reduce boilerplate in collectors
///
/// Wraps page fetches with consistent error handling:
/// - On success: processes the page, logs success, returns `CollectionStatus::Success`
/// - On fetch or processing error: logs warning, returns `CollectionStatus::Failed`
///
/// Metrics are only touched by `process`, so a failed fetch leaves them unchanged.
///
/// # Arguments
///
/// * `name` - Name of the page being collected (for logging)
/// * `fetch_future` - Async fetch that returns the page
/// * `process` - Function to parse the page and update metrics
///
/// # Examples
///
/// ```no_run
/// # use surfboard_exporter::collectors::*;
/// # use surfboard_exporter::parsers::parse_status_page;
/// async fn example(ctx: &CollectionContext<'_>) -> CollectionStatus {
///     collect_with_handler(
///         "status page",
///         ctx.client.fetch_status_page(),
///         |html| {
///             ctx.metrics.apply_status_report(&parse_status_page(&html));
///             Ok::<(), std::convert::Infallible>(())
///         },
///     ).await
/// }
/// ```
pub async fn collect_with_handler<T, F, P, E, PE>(
    name: &str,
    fetch_future: F,
    process: P,
) -> CollectionStatus
where
    F: std::future::Future<Output = Result<T, E>>,
    E: fmt::Display,
    P: FnOnce(T) -> Result<(), PE>,
    PE: fmt::Display,
{
    let data = match fetch_future.await {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to fetch {}: {}", name, e);
            return CollectionStatus::Failed {
                reason: format!("fetch {}: {}", name, e),
            };
        }
    };

    match process(data) {
        Ok(()) => {
            info!("Updated {} metrics", name);
            CollectionStatus::Success
        }
        Err(e) => {
            warn!("Failed to parse {}: {}", name, e);
            CollectionStatus::Failed {
                reason: format!("parse {}: {}", name, e),
            }
        }
    }
}

/// Summary of one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Both pages were fetched, parsed and applied
    Success,
    /// At least one page kept its previous values
    PartialFailure { reasons: Vec<String> },
}

impl PollOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Success)
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollOutcome::Success => write!(f, "success"),
            PollOutcome::PartialFailure { reasons } => {
                write!(f, "partial failure ({})", reasons.join("; "))
            }
        }
    }
}

/// Runs one fetch-and-parse cycle over both pages
///
/// Never fails: every problem is folded into the returned [`PollOutcome`], which also
/// drives `surfboard_up` and `surfboard_poll_duration_seconds`.
pub async fn poll_once(ctx: &CollectionContext<'_>) -> PollOutcome {
    let started = Instant::now();
    let mut reasons = Vec::new();

    for status in [
        collect_status_metrics(ctx).await,
        collect_signal_metrics(ctx).await,
    ] {
        if let CollectionStatus::Failed { reason } = status {
            reasons.push(reason);
        }
    }

    let outcome = if reasons.is_empty() {
        PollOutcome::Success
    } else {
        PollOutcome::PartialFailure { reasons }
    };

    let elapsed = started.elapsed();
    ctx.metrics.poll_duration_seconds.set(elapsed.as_secs_f64());
    ctx.metrics
        .up
        .set(if outcome.is_success() { 1.0 } else { 0.0 });

    if outcome.is_success() {
        info!("Poll cycle finished in {:.3}s", elapsed.as_secs_f64());
    } else {
        warn!("Poll cycle finished with {}", outcome);
    }

    outcome
}

/// Pause before the next cycle: the rest of the refresh interval, but never less
/// than `floor` (itself never less than [`MIN_SLEEP_FLOOR`])
pub fn next_sleep(refresh_rate: Duration, elapsed: Duration, floor: Duration) -> Duration {
    refresh_rate
        .saturating_sub(elapsed)
        .max(floor)
        .max(MIN_SLEEP_FLOOR)
}

// Collector modules
pub mod signal;
pub mod status;

// Re-export collector functions for convenient access
pub use signal::collect_signal_metrics;
pub use status::collect_status_metrics;
