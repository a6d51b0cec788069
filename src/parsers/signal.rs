//! Signal Page Parser
//!
//! `cmSignalData.htm` holds one table per signal group. Each data table has the same
//! shape:
//!
//! ```text
//! row 0   | Downstream                                      |   <- table name
//! row 1   | Channel ID   | 1        | 2        | 3        |   <- channel ids
//! row 2.. | Power Level  | 5.1 dBmV | 4.9 dBmV | 5.0 dBmV |   <- data rows
//! ```
//!
//! Data row labels are matched by prefix against the table's [`SignalField`]
//! schedule. Rows that match nothing (e.g. explanatory text) are skipped silently,
//! and so are cells without a leading number.
//!
//! # Errors
//!
//! The channel row and the data rows must line up. A data row with a different number
//! of values than there are channels, or a channel id that is not an integer, fails the
//! whole page: no readings are returned for it.

use super::numeric::leading_number;
use crate::error::{ExporterError, Result};
use crate::surfboard::html::{self, HtmlTable};
use crate::surfboard::types::{SignalField, SignalKey, SignalTable};
use tracing::debug;

/// Minimum rows of a data table: header, channel ids, one data row
pub const MIN_TABLE_ROWS: usize = 3;

/// One per-channel value from the signal page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalReading {
    pub key: SignalKey,
    pub channel: u32,
    pub value: f64,
}

/// Parses raw signal page HTML
pub fn parse_signal_page(html: &str) -> Result<Vec<SignalReading>> {
    parse_signal_tables(&html::document_tables(html))
}

/// Parses every table of the page, in page order
pub fn parse_signal_tables(tables: &[HtmlTable]) -> Result<Vec<SignalReading>> {
    let mut readings = Vec::new();
    for table in tables {
        readings.extend(parse_signal_table(table)?);
    }
    Ok(readings)
}

/// Parses a single table
///
/// Tables with fewer than [`MIN_TABLE_ROWS`] rows and tables whose name is not in the
/// signal schedule yield no readings and no error.
pub fn parse_signal_table(table: &HtmlTable) -> Result<Vec<SignalReading>> {
    if table.rows.len() < MIN_TABLE_ROWS {
        return Ok(Vec::new());
    }
    let [header, channel_row, data_rows @ ..] = table.rows.as_slice() else {
        return Ok(Vec::new());
    };

    let title = header.heading.as_deref().unwrap_or_default();
    let Some(signal_table) = SignalTable::from_title(title) else {
        debug!("Skipping table {:?}: not a known signal table", title);
        return Ok(Vec::new());
    };

    let channels = channel_ids(title, channel_row.cells.get(1..).unwrap_or_default())?;

    let mut readings = Vec::new();
    for row in data_rows {
        let Some((label, values)) = row.cells.split_first() else {
            continue;
        };
        let Some(field) = signal_table.match_field(label) else {
            continue;
        };
        if values.len() != channels.len() {
            return Err(ExporterError::ChannelMismatch {
                table: title.to_string(),
                channels: channels.len(),
                values: values.len(),
            });
        }

        let key = SignalKey::new(signal_table, field);
        readings.extend(channels.iter().zip(values).filter_map(|(&channel, cell)| {
            leading_number(cell).map(|value| SignalReading {
                key,
                channel,
                value,
            })
        }));
    }

    Ok(readings)
}

fn channel_ids(table: &str, cells: &[String]) -> Result<Vec<u32>> {
    cells
        .iter()
        .map(|cell| {
            cell.parse::<u32>()
                .map_err(|_| ExporterError::InvalidChannel {
                    table: table.to_string(),
                    value: cell.clone(),
                })
        })
        .collect()
}

/// Readings of one schedule entry, as `(channel, value)` pairs in page order
pub fn readings_for(
    readings: &[SignalReading],
    table: SignalTable,
    field: SignalField,
) -> Vec<(u32, f64)> {
    let key = SignalKey::new(table, field);
    readings
        .iter()
        .filter(|reading| reading.key == key)
        .map(|reading| (reading.channel, reading.value))
        .collect()
}
