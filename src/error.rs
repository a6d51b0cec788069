use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Modem returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Duration parse error: unrecognized duration {0:?}")]
    DurationParse(String),

    #[error(
        "Signal table {table:?} is inconsistent: {channels} channels but {values} values"
    )]
    ChannelMismatch {
        table: String,
        channels: usize,
        values: usize,
    },

    #[error("Signal table {table:?} has an invalid channel id {value:?}")]
    InvalidChannel { table: String, value: String },

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
