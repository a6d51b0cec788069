//! Modem Page Parsers
//!
//! Pure functions turning modem pages into typed values. Nothing in this module does
//! I/O or touches metrics; the [`collectors`](crate::collectors) apply the results.
//!
//! - [`duration`] - uptime strings to seconds
//! - [`numeric`] - leading number of a noisy cell
//! - [`status`] - status page rows to task states and uptime
//! - [`signal`] - signal page tables to per-channel readings

pub mod duration;
pub mod numeric;
pub mod signal;
pub mod status;

pub use duration::parse_duration;
pub use numeric::leading_number;
pub use signal::{parse_signal_page, parse_signal_tables, SignalReading};
pub use status::{parse_status_page, parse_status_rows, StatusAnomaly, StatusReport, StatusRow};
