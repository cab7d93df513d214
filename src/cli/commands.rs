//! CLI argument definitions

use clap::Parser;
use notiprobe_client::{BusConfig, DEFAULT_URL};

#[derive(Parser, Debug)]
#[command(name = "notiprobe")]
#[command(about = "Interactive test client for the NATS notification service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// NATS server URL
    #[arg(long, env = "NATS_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Connection name reported to the NATS server
    #[arg(long, env = "NOTIPROBE_NAME", default_value = "notiprobe")]
    pub name: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn bus_config(&self) -> BusConfig {
        BusConfig::new(&self.url).connection_name(&self.name)
    }
}
