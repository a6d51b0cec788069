//! Signal Page Collector
//!
//! Collects per-channel signal readings from `cmSignalData.htm`.
//!
//! # Metrics Produced
//! - `surfboard_downstream_*` - Frequency, SNR, modulation, power level
//!   - Labels: channel
//! - `surfboard_upstream_*` - Frequency, ranging service id, symbol rate, power level
//!   - Labels: channel
//! - `surfboard_signal_status_codewords_*` - Unerrored/correctable/uncorrectable totals
//!   - Labels: channel

use super::{collect_with_handler, CollectionContext, CollectionStatus};
use crate::parsers::parse_signal_page;

/// Collects signal page metrics from the modem
///
/// A structurally inconsistent page (channel row and data rows of different widths)
/// is rejected as a whole, leaving every signal gauge at its previous value.
///
/// # Returns
///
/// * `CollectionStatus::Success` - Page fetched, parsed and applied
/// * `CollectionStatus::Failed { .. }` - Fetch or parse failed; previous values retained
pub async fn collect_signal_metrics(ctx: &CollectionContext<'_>) -> CollectionStatus {
    collect_with_handler("signal page", ctx.client.fetch_signal_page(), |html| {
        let readings = parse_signal_page(&html)?;
        ctx.metrics.apply_signal_readings(&readings);
        Ok::<(), crate::error::ExporterError>(())
    })
    .await
}
