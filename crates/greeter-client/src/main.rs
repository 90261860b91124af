#![doc = include_str!("../README.md")]

use clap::Parser;
use greeter_client::client::{
    config::{CliArgs, ClientConfig},
    driver,
    telemetry::init_logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ClientConfig::try_from(args)?;

    init_logging()?;
    tracing::info!(
        "Connecting to {} with {} names (compression: {})",
        config.endpoint.uri(),
        config.names.names.len(),
        config.compression
    );

    match driver::run(&config).await {
        Ok(report) => {
            tracing::info!(
                "Finished: {} server-streamed and {} bidirectional greetings",
                report.server_streaming.len(),
                report.bidirectional_streaming.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            Err(e.into())
        }
    }
}
