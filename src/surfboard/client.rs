//! SURFboard HTTP Client
//!
//! Fetches the modem's status and signal pages. The modem serves plain HTTP without
//! authentication on its management address (`192.168.100.1` by default).
//!
//! # Example
//!
//! ```no_run
//! use surfboard_exporter::config::ModemConfig;
//! use surfboard_exporter::surfboard::ModemClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ModemClient::new(ModemConfig::default())?;
//! let status_page = client.fetch_status_page().await?;
//! # Ok(())
//! # }
//! ```

use crate::config::ModemConfig;
use crate::error::{ExporterError, Result};
use tracing::debug;

/// Client for the modem's status pages
///
/// Every request carries the configured timeout, so a hung modem delays one poll cycle
/// instead of stalling the exporter.
pub struct ModemClient {
    http: reqwest::Client,
    status_url: String,
    signal_url: String,
}

impl ModemClient {
    pub fn new(config: ModemConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            status_url: config.status_url(),
            signal_url: config.signal_url(),
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    pub fn signal_url(&self) -> &str {
        &self.signal_url
    }

    /// Fetch the raw HTML of the status page (`indexData.htm`)
    pub async fn fetch_status_page(&self) -> Result<String> {
        self.fetch(&self.status_url).await
    }

    /// Fetch the raw HTML of the signal page (`cmSignalData.htm`)
    pub async fn fetch_signal_page(&self) -> Result<String> {
        self.fetch(&self.signal_url).await
    }

    /// GET a page, treating any non-2xx status as an error
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExporterError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
