//! Status Page Collector
//!
//! Collects boot task states and uptime from `indexData.htm`.
//!
//! # Metrics Produced
//! - `surfboard_<task>` - Boot task state-set, one series per state (1=current)
//!   - Labels: `surfboard_<task>` (the state name)
//! - `surfboard_system_up_time` - Modem uptime in seconds

use super::{collect_with_handler, CollectionContext, CollectionStatus};
use crate::parsers::parse_status_page;
use std::convert::Infallible;

/// Collects status page metrics from the modem
///
/// Unknown task states and unrecognized rows are logged by the parser and do not fail
/// the collection.
///
/// # Returns
///
/// * `CollectionStatus::Success` - Page fetched and applied
/// * `CollectionStatus::Failed { .. }` - Fetch failed; previous values retained
pub async fn collect_status_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    collect_with_handler("status page", ctx.client.fetch_status_page(), |html| {
        let report = parse_status_page(&html);
        ctx.metrics.apply_status_report(&report);
        Ok::<(), Infallible>(())
    })
    .await
}
