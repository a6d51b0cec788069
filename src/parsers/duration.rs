//! Uptime Duration Parser
//!
//! The status page reports uptime as free text, e.g. `3 days 04h:12m:09s`, or
//! `05h:00m:09s` while the modem has been up for less than a day.

use crate::error::{ExporterError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<days>[0-9]+) days )?(?P<hours>[0-9]+)h:(?P<minutes>[0-9]{1,2})m:(?P<seconds>[0-9]{1,2})s",
    )
    .unwrap()
});

const UNITS: [(&str, u64); 4] = [
    ("days", 24 * 60 * 60),
    ("hours", 60 * 60),
    ("minutes", 60),
    ("seconds", 1),
];

/// Converts a modem uptime string into whole seconds
///
/// A missing `days` segment counts as zero. Text after the seconds field is ignored.
///
/// # Errors
///
/// Returns [`ExporterError::DurationParse`] when the text does not start with a
/// duration, or when the total does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use surfboard_exporter::parsers::parse_duration;
///
/// assert_eq!(parse_duration("1 days 02h:03m:04s").unwrap(), 93_784);
/// assert_eq!(parse_duration("05h:00m:09s").unwrap(), 18_009);
/// assert!(parse_duration("yesterday").is_err());
/// ```
pub fn parse_duration(text: &str) -> Result<u64> {
    let invalid = || ExporterError::DurationParse(text.to_string());
    let captures = DURATION_RE.captures(text.trim()).ok_or_else(invalid)?;

    UNITS.iter().try_fold(0u64, |total, &(unit, scale)| {
        let count = match captures.name(unit) {
            Some(group) => group.as_str().parse::<u64>().map_err(|_| invalid())?,
            None => 0,
        };
        count
            .checked_mul(scale)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(invalid)
    })
}
