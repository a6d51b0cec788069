use anyhow::Result;
use clap::Parser;
use surfboard_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Modem base URL (overrides config)
    #[arg(long, env = "SURFBOARD_MODEM_URL")]
    modem_url: Option<String>,

    /// Seconds between modem polls (overrides config)
    #[arg(short, long, alias = "refresh_rate", env = "SURFBOARD_REFRESH_RATE")]
    refresh_rate: Option<u64>,

    /// Port to listen on for metrics (overrides config)
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SURFboard Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(url) = args.modem_url {
        config.modem.base_url = url;
    }
    if let Some(refresh_rate) = args.refresh_rate {
        config.metrics.refresh_rate_seconds = refresh_rate;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    info!("Configuration loaded successfully");
    info!("Modem: {}", config.modem.base_url);
    info!(
        "Refresh rate: {}s (minimum pause {}s)",
        config.metrics.refresh_rate_seconds, config.metrics.min_sleep_seconds
    );
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
