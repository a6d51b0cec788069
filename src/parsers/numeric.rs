//! Numeric Token Extractor
//!
//! Signal page cells mix a number with its unit or annotation (`35.2 dBmV`,
//! `256 QAM`, `591000000 Hz`). Only the leading number carries meaning.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?").unwrap());

/// Returns the unsigned decimal number a cell starts with, if any
///
/// Leading whitespace is skipped. `None` is an expected outcome (e.g. `N/A`), not an
/// error.
///
/// # Examples
///
/// ```
/// use surfboard_exporter::parsers::leading_number;
///
/// assert_eq!(leading_number("35.2 dBmV"), Some(35.2));
/// assert_eq!(leading_number("256 QAM"), Some(256.0));
/// assert_eq!(leading_number("N/A"), None);
/// ```
pub fn leading_number(text: &str) -> Option<f64> {
    NUMBER_RE
        .find(text.trim_start())
        .and_then(|token| token.as_str().parse().ok())
}
