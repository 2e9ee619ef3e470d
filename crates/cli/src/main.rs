use clap::Parser;
use pihole_exporter_api::AppState;
use pihole_exporter_domain::{CliOverrides, Config};
use pihole_exporter_jobs::{JobRunner, LogShipJob, MetricsScrapeJob};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "pihole-exporter")]
#[command(version)]
#[command(about = "Prometheus metrics and Loki log exporter for Pi-hole v6")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Hostname/IP of the Pi-hole instance
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to expose for scraping
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Pi-hole API token
    #[arg(short = 'k', long)]
    key: Option<String>,

    /// Loki/Alloy push target base URL; enables the log shipper
    #[arg(short = 'u', long)]
    loki_url: Option<String>,

    /// Cursor state file for the log shipper
    #[arg(short = 's', long)]
    state_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        pihole_host: cli.host.clone(),
        api_token: cli.key.clone(),
        port: cli.port,
        loki_url: cli.loki_url.clone(),
        state_file: cli.state_file.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = Config::load(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Pi-hole exporter v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    let mut runner = JobRunner::new()
        .with_metrics_scrape(
            MetricsScrapeJob::new(services.scrape_cycle.clone())
                .with_interval(config.metrics.scrape_interval_secs),
        )
        .with_shutdown_token(shutdown.clone());

    if let Some(shipper) = services.ship_logs.clone() {
        runner = runner
            .with_log_ship(LogShipJob::new(shipper).with_interval(config.shipper.interval_secs));
    }

    runner.start().await;

    let app_state = AppState {
        snapshots: services.snapshots.clone(),
    };

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    server::start_web_server(bind_addr, app_state, shutdown).await?;

    info!("Exporter shutdown complete");
    Ok(())
}
