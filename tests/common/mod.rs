//! Shared fixtures: modem page samples and an in-process fake modem.

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, response::Html, routing::get, Router};
use parking_lot::Mutex;
use std::sync::Arc;
use surfboard_exporter::config::{Config, ModemConfig};

/// Status page in the shape served by the SB6141
pub const STATUS_PAGE: &str = r#"<html>
<head><title>Touchstone Status</title></head>
<body>
<table>
<tr><th colspan="2">Startup Procedure</th></tr>
<tr><td>DOCSIS Downstream Channel Acquisition</td><td>Done</td></tr>
<tr><td>DOCSIS Ranging</td><td>Done</td></tr>
<tr><td>Establish IP Connectivity using DHCP</td><td>Done</td></tr>
<tr><td>Establish Time Of Day</td><td>Done</td></tr>
<tr><td>Transfer Operational Parameters through TFTP</td><td>Done</td></tr>
<tr><td>Register Connection</td><td>Done</td></tr>
<tr><td>Cable Modem Status</td><td>Operational</td></tr>
<tr><td>Initialize Baseline Privacy</td><td>Done</td></tr>
<tr><td>Current Time and Date</td><td>Thu Jan 01 00:00:00 2015</td></tr>
<tr><td>System Up Time</td><td>3 days 04h:12m:09s</td></tr>
</table>
</body>
</html>"#;

/// Uptime of [`STATUS_PAGE`] in seconds
pub const STATUS_PAGE_UPTIME: u64 = 3 * 86_400 + 4 * 3_600 + 12 * 60 + 9;

/// Signal page with the three data tables, a nested help table and a layout table
pub const SIGNAL_PAGE: &str = r##"<html>
<body>
<table>
<tr><td>Signal</td></tr>
<tr><td>Status</td></tr>
</table>
<table border="1">
<tr><th colspan="4"><font color="#ffffff">Downstream </font></th></tr>
<tr><td>Channel ID</td><td>1&nbsp;</td><td>2&nbsp;</td><td>3&nbsp;</td></tr>
<tr><td>Frequency</td><td>591000000 Hz&nbsp;</td><td>597000000 Hz&nbsp;</td><td>603000000 Hz&nbsp;</td></tr>
<tr><td>Signal to Noise Ratio</td><td>38 dB&nbsp;</td><td>37 dB&nbsp;</td><td>38 dB&nbsp;</td></tr>
<tr><td>Downstream Modulation</td><td>QAM256&nbsp;</td><td>QAM256&nbsp;</td><td>QAM256&nbsp;</td></tr>
<tr><td>Power Level<table><tr><td>The Downstream Power Level reading is a snapshot taken at the time this page was requested.</td></tr></table></td><td>5.1 dBmV</td><td>4.9 dBmV</td><td>5.0 dBmV</td></tr>
</table>
<table border="1">
<tr><th colspan="2"><font color="#ffffff">Upstream </font></th></tr>
<tr><td>Channel ID</td><td>4&nbsp;</td></tr>
<tr><td>Frequency</td><td>30600000 Hz&nbsp;</td></tr>
<tr><td>Ranging Service ID</td><td>1234&nbsp;</td></tr>
<tr><td>Symbol Rate</td><td>5.120 Msym/sec&nbsp;</td></tr>
<tr><td>Power Level</td><td>41 dBmV&nbsp;</td></tr>
<tr><td>Upstream Modulation</td><td>[3] QPSK<br>[3] 64QAM<br></td></tr>
<tr><td>Ranging Status</td><td>Success&nbsp;</td></tr>
</table>
<table border="1">
<tr><th colspan="4"><font color="#ffffff">Signal Status (Codewords)</font></th></tr>
<tr><td>Channel ID</td><td>1&nbsp;</td><td>2&nbsp;</td><td>3&nbsp;</td></tr>
<tr><td>Total Unerrored Codewords</td><td>1234567</td><td>2345678</td><td>3456789</td></tr>
<tr><td>Total Correctable Codewords</td><td>12</td><td>0</td><td>3</td></tr>
<tr><td>Total Uncorrectable Codewords</td><td>45</td><td>6</td><td>0</td></tr>
</table>
</body>
</html>"##;

/// Wraps table rows (`<tr>...</tr>` markup) into a page with a single table
pub fn single_table_page(rows: &str) -> String {
    format!("<html><body><table>{}</table></body></html>", rows)
}

/// Pages currently served by a [`FakeModem`]
#[derive(Debug, Clone)]
pub struct Pages {
    pub status_code: u16,
    pub status_html: String,
    pub signal_html: String,
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_html: STATUS_PAGE.to_string(),
            signal_html: SIGNAL_PAGE.to_string(),
        }
    }
}

type SharedPages = Arc<Mutex<Pages>>;

/// A local HTTP server answering like the modem
pub struct FakeModem {
    pages: SharedPages,
    pub base_url: String,
}

impl FakeModem {
    pub async fn spawn(pages: Pages) -> Self {
        let pages = Arc::new(Mutex::new(pages));
        let app = Router::new()
            .route("/indexData.htm", get(status_page))
            .route("/cmSignalData.htm", get(signal_page))
            .with_state(pages.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake modem");
        let addr = listener.local_addr().expect("Fake modem has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake modem crashed");
        });

        Self {
            pages,
            base_url: format!("http://{}", addr),
        }
    }

    /// Replace the pages served from now on
    pub fn update(&self, change: impl FnOnce(&mut Pages)) {
        change(&mut self.pages.lock());
    }

    pub fn config(&self) -> Config {
        config_for(&self.base_url)
    }
}

/// Exporter configuration pointing at `base_url`
pub fn config_for(base_url: &str) -> Config {
    Config {
        modem: ModemConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
            ..ModemConfig::default()
        },
        ..Config::default()
    }
}

async fn status_page(State(pages): State<SharedPages>) -> (StatusCode, Html<String>) {
    let pages = pages.lock();
    (
        StatusCode::from_u16(pages.status_code).unwrap_or(StatusCode::OK),
        Html(pages.status_html.clone()),
    )
}

async fn signal_page(State(pages): State<SharedPages>) -> (StatusCode, Html<String>) {
    let pages = pages.lock();
    (
        StatusCode::from_u16(pages.status_code).unwrap_or(StatusCode::OK),
        Html(pages.signal_html.clone()),
    )
}

/// Renders `metrics` and returns the names declared by `# TYPE` lines
pub fn rendered_metric_names(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .filter_map(|line| line.strip_prefix("# TYPE "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
