//! notiprobe entry point

mod cli;

use crate::cli::Cli;
use anyhow::{Context, Result};
use clap::Parser;
use notiprobe::{run_session, Probe};
use notiprobe_client::NatsBus;
use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the menu on stdout
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = cli.bus_config();
    let request_timeout = config.request_timeout;
    let bus = NatsBus::connect(config)
        .await
        .with_context(|| format!("Failed to connect to NATS at {}", cli.url))?;

    let probe = Probe::new(bus).request_timeout(request_timeout);

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let summary = run_session(&probe, &mut input, &mut out)
        .await
        .context("Terminal I/O failed")?;
    debug!(
        sent = summary.requests_sent,
        failed = summary.requests_failed,
        invalid = summary.invalid_inputs,
        "Probe finished"
    );

    Ok(())
}
