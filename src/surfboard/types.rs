//! SURFboard Page Vocabulary
//!
//! Static schedules describing which rows of the modem pages are recognized and how
//! they map onto metrics. Everything here is fixed at compile time: the exporter never
//! learns new task names or signal fields at runtime.
//!
//! # Schedules
//!
//! - [`Task`] - Boot/registration steps listed on the status page
//! - [`TaskState`] - Lifecycle states a task can report
//! - [`SignalTable`] - Tables on the signal page
//! - [`SignalField`] - Row prefixes recognized inside those tables
//!
//! # Metric Naming
//!
//! [`metric_name`] derives a Prometheus name from schedule words: parentheses are
//! dropped, spaces become underscores, and the result is lowercased under the
//! `surfboard` namespace.

/// Namespace shared by every exported metric
pub const METRIC_PREFIX: &str = "surfboard";

/// Status page row holding the modem uptime
pub const UPTIME_LABEL: &str = "System Up Time";

/// Status page row holding the modem clock (not exported)
pub const TIME_LABEL: &str = "Current Time and Date";

/// A step of the DOCSIS boot sequence shown on the status page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    DownstreamChannelAcquisition,
    Ranging,
    EstablishIpConnectivity,
    EstablishTimeOfDay,
    TransferOperationalParameters,
    RegisterConnection,
    CableModemStatus,
    InitializeBaselinePrivacy,
}

impl Task {
    pub const ALL: [Task; 8] = [
        Task::DownstreamChannelAcquisition,
        Task::Ranging,
        Task::EstablishIpConnectivity,
        Task::EstablishTimeOfDay,
        Task::TransferOperationalParameters,
        Task::RegisterConnection,
        Task::CableModemStatus,
        Task::InitializeBaselinePrivacy,
    ];

    /// Row label as printed by the modem
    pub fn label(self) -> &'static str {
        match self {
            Task::DownstreamChannelAcquisition => "DOCSIS Downstream Channel Acquisition",
            Task::Ranging => "DOCSIS Ranging",
            Task::EstablishIpConnectivity => "Establish IP Connectivity using DHCP",
            Task::EstablishTimeOfDay => "Establish Time Of Day",
            Task::TransferOperationalParameters => "Transfer Operational Parameters through TFTP",
            Task::RegisterConnection => "Register Connection",
            Task::CableModemStatus => "Cable Modem Status",
            Task::InitializeBaselinePrivacy => "Initialize Baseline Privacy",
        }
    }

    /// Exact, case-sensitive lookup of a status row label
    pub fn from_label(label: &str) -> Option<Task> {
        Task::ALL.into_iter().find(|task| task.label() == label)
    }

    /// Position in [`Task::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn metric_name(self) -> String {
        metric_name(&[self.label()])
    }
}

/// Lifecycle state reported for a [`Task`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    NotStarted,
    Offline,
    Done,
    Operational,
    /// Any value the modem reports that is not one of the known states
    Other,
}

impl TaskState {
    pub const ALL: [TaskState; 5] = [
        TaskState::NotStarted,
        TaskState::Offline,
        TaskState::Done,
        TaskState::Operational,
        TaskState::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskState::NotStarted => "Not started",
            TaskState::Offline => "Offline",
            TaskState::Done => "Done",
            TaskState::Operational => "Operational",
            TaskState::Other => "Other",
        }
    }

    /// Exact lookup of a reported state. `"Other"` is accepted as a literal too.
    pub fn from_label(label: &str) -> Option<TaskState> {
        TaskState::ALL.into_iter().find(|state| state.label() == label)
    }
}

/// A data table on the signal page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalTable {
    Downstream,
    Upstream,
    Codewords,
}

impl SignalTable {
    pub const ALL: [SignalTable; 3] = [
        SignalTable::Downstream,
        SignalTable::Upstream,
        SignalTable::Codewords,
    ];

    /// Table heading as printed by the modem
    pub fn title(self) -> &'static str {
        match self {
            SignalTable::Downstream => "Downstream",
            SignalTable::Upstream => "Upstream",
            SignalTable::Codewords => "Signal Status (Codewords)",
        }
    }

    pub fn from_title(title: &str) -> Option<SignalTable> {
        SignalTable::ALL
            .into_iter()
            .find(|table| table.title() == title)
    }

    /// Recognized row prefixes, in match priority order
    pub fn fields(self) -> &'static [SignalField] {
        match self {
            SignalTable::Downstream => &[
                SignalField::Frequency,
                SignalField::SignalToNoiseRatio,
                SignalField::DownstreamModulation,
                SignalField::PowerLevel,
            ],
            SignalTable::Upstream => &[
                SignalField::Frequency,
                SignalField::RangingServiceId,
                SignalField::SymbolRate,
                SignalField::PowerLevel,
            ],
            SignalTable::Codewords => &[
                SignalField::TotalUnerroredCodewords,
                SignalField::TotalCorrectableCodewords,
                SignalField::TotalUncorrectableCodewords,
            ],
        }
    }

    /// First schedule entry the row label starts with
    pub fn match_field(self, row_label: &str) -> Option<SignalField> {
        self.fields()
            .iter()
            .copied()
            .find(|field| row_label.starts_with(field.label()))
    }
}

/// A row prefix on the signal page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalField {
    Frequency,
    SignalToNoiseRatio,
    DownstreamModulation,
    PowerLevel,
    RangingServiceId,
    SymbolRate,
    TotalUnerroredCodewords,
    TotalCorrectableCodewords,
    TotalUncorrectableCodewords,
}

impl SignalField {
    pub fn label(self) -> &'static str {
        match self {
            SignalField::Frequency => "Frequency",
            SignalField::SignalToNoiseRatio => "Signal to Noise Ratio",
            SignalField::DownstreamModulation => "Downstream Modulation",
            SignalField::PowerLevel => "Power Level",
            SignalField::RangingServiceId => "Ranging Service ID",
            SignalField::SymbolRate => "Symbol Rate",
            SignalField::TotalUnerroredCodewords => "Total Unerrored Codewords",
            SignalField::TotalCorrectableCodewords => "Total Correctable Codewords",
            SignalField::TotalUncorrectableCodewords => "Total Uncorrectable Codewords",
        }
    }
}

/// A (table, field) pair from the signal schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalKey {
    pub table: SignalTable,
    pub field: SignalField,
}

impl SignalKey {
    pub fn new(table: SignalTable, field: SignalField) -> Self {
        Self { table, field }
    }

    /// Every key in the schedule, table by table
    pub fn all() -> impl Iterator<Item = SignalKey> {
        SignalTable::ALL.into_iter().flat_map(|table| {
            table
                .fields()
                .iter()
                .map(move |&field| SignalKey::new(table, field))
        })
    }

    pub fn metric_name(self) -> String {
        metric_name(&[self.table.title(), self.field.label()])
    }

    pub fn help(self) -> String {
        format!("{}: {}", self.table.title(), self.field.label())
    }
}

/// Builds a namespaced metric name from schedule words
///
/// # Examples
///
/// ```
/// use surfboard_exporter::surfboard::types::metric_name;
///
/// assert_eq!(
///     metric_name(&["Signal Status (Codewords)", "Total Unerrored Codewords"]),
///     "surfboard_signal_status_codewords_total_unerrored_codewords"
/// );
/// ```
pub fn metric_name(words: &[&str]) -> String {
    std::iter::once(METRIC_PREFIX.to_string())
        .chain(words.iter().map(|word| {
            word.replace(['(', ')'], "")
                .trim()
                .replace(' ', "_")
        }))
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
