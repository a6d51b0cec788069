//! SURFboard Prometheus Exporter
//!
//! A Prometheus metrics exporter for the Arris SURFboard SB6141 cable modem.
//!
//! # Overview
//!
//! The modem has no API: it only serves human-readable HTML status pages. This exporter
//! polls those pages on a fixed schedule, parses their tables into typed values, and
//! exposes the results in Prometheus format for scraping by Prometheus/Grafana.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    HTTP (HTML)       ┌──────────────┐
//! │  SURFboard  │ ◄─────────────────►  │   Exporter   │
//! │   SB6141    │  indexData.htm       │              │
//! └─────────────┘  cmSignalData.htm    │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │Parsers │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`surfboard`] - HTTP client, HTML adapter and the static page schedules
//! - [`parsers`] - Pure parsers for durations, numbers, and both modem pages
//! - [`collectors`] - Fetch, parse and apply one page; one poll cycle
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - HTTP server and poll loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use surfboard_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - ✅ DOCSIS boot task states
//! - ✅ Modem uptime
//! - ✅ Downstream/upstream frequency, SNR, power level, symbol rate
//! - ✅ Correctable and uncorrectable codeword counters per channel

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod parsers;
pub mod server;
pub mod surfboard;
