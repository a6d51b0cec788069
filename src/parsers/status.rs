//! Status Page Parser
//!
//! Reads the two-column label/value rows of `indexData.htm`:
//!
//! | Label                                 | Value                 |
//! |---------------------------------------|-----------------------|
//! | DOCSIS Downstream Channel Acquisition | Done                  |
//! | Cable Modem Status                    | Operational           |
//! | System Up Time                        | 3 days 04h:12m:09s    |
//! | Current Time and Date                 | Thu Jan 01 00:00 2015 |
//!
//! # Row Handling
//!
//! - Task rows set the task state; unknown state text becomes [`TaskState::Other`]
//! - The uptime row goes through [`parse_duration`]; a malformed value is reported and
//!   skipped instead of failing the page
//! - The clock row is ignored
//! - Any other label is reported as unrecognized
//!
//! Anomalies are logged as warnings and returned in the [`StatusReport`]. A single
//! bad row never prevents the remaining rows from being read.

use super::duration::parse_duration;
use crate::surfboard::html::{self, TableRow};
use crate::surfboard::types::{Task, TaskState, TIME_LABEL, UPTIME_LABEL};
use std::fmt;
use tracing::warn;

/// What a single status row means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRow<'a> {
    /// A boot task and the raw state text reported for it
    Task { task: Task, value: &'a str },
    /// The uptime row and its raw duration text
    Uptime(&'a str),
    /// The modem clock row (not exported)
    Clock,
    /// A label/value row whose label is not in the schedule
    Unrecognized { label: &'a str },
    /// Not a label/value row at all (wrong cell count or an empty cell)
    Malformed,
}

/// Classifies a row without interpreting its value
pub fn classify_row(row: &TableRow) -> StatusRow<'_> {
    let [label, value] = row.cells.as_slice() else {
        return StatusRow::Malformed;
    };
    if label.is_empty() || value.is_empty() {
        return StatusRow::Malformed;
    }

    if let Some(task) = Task::from_label(label) {
        StatusRow::Task { task, value }
    } else if label == UPTIME_LABEL {
        StatusRow::Uptime(value)
    } else if label == TIME_LABEL {
        StatusRow::Clock
    } else {
        StatusRow::Unrecognized { label }
    }
}

/// A recoverable oddity found on the status page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusAnomaly {
    UnknownState { task: Task, value: String },
    InvalidUptime { value: String },
    UnknownRow { label: String },
}

impl fmt::Display for StatusAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusAnomaly::UnknownState { task, value } => {
                write!(f, "Unknown state {} for task {}", value, task.label())
            }
            StatusAnomaly::InvalidUptime { value } => write!(f, "Invalid uptime {:?}", value),
            StatusAnomaly::UnknownRow { label } => write!(f, "Unknown row {}", label),
        }
    }
}

/// Typed contents of one status page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Task states in page order; a task listed twice appears twice
    pub tasks: Vec<(Task, TaskState)>,
    pub uptime_seconds: Option<u64>,
    pub anomalies: Vec<StatusAnomaly>,
}

impl StatusReport {
    /// Last state reported for a task
    pub fn state_of(&self, task: Task) -> Option<TaskState> {
        self.tasks
            .iter()
            .rev()
            .find(|(reported, _)| *reported == task)
            .map(|&(_, state)| state)
    }
}

/// Parses raw status page HTML
pub fn parse_status_page(html: &str) -> StatusReport {
    parse_status_rows(&html::document_rows(html))
}

/// Parses already-extracted status rows
pub fn parse_status_rows(rows: &[TableRow]) -> StatusReport {
    let mut report = StatusReport::default();

    for row in rows {
        match classify_row(row) {
            StatusRow::Task { task, value } => {
                let state = TaskState::from_label(value).unwrap_or_else(|| {
                    report.anomalies.push(StatusAnomaly::UnknownState {
                        task,
                        value: value.to_string(),
                    });
                    TaskState::Other
                });
                report.tasks.push((task, state));
            }
            StatusRow::Uptime(value) => match parse_duration(value) {
                Ok(seconds) => report.uptime_seconds = Some(seconds),
                Err(_) => report.anomalies.push(StatusAnomaly::InvalidUptime {
                    value: value.to_string(),
                }),
            },
            StatusRow::Unrecognized { label } => {
                report.anomalies.push(StatusAnomaly::UnknownRow {
                    label: label.to_string(),
                });
            }
            StatusRow::Clock | StatusRow::Malformed => {}
        }
    }

    for anomaly in &report.anomalies {
        warn!("{}", anomaly);
    }

    report
}
