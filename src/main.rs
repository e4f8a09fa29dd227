//! slirc - Straylight IRC client.
//!
//! Connects to every `[[network]]` in the config file and runs until Ctrl-C.

use slirc_client::config::Config;
use slirc_client::network::writer;
use slirc_client::{Bridge, ClientHandle, Dispatcher, TcpConnector, WriteQueue, telemetry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slirc.toml".to_string());

    let config = Config::load_validated(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(networks = config.networks.len(), "Starting slirc");

    let (events_tx, events_rx) = mpsc::channel(config.queues.events);
    let (writes, writes_rx) = WriteQueue::new(config.queues.writes);
    let writer = tokio::spawn(writer::run(writes_rx));

    let mut dispatcher = Dispatcher::new(events_tx.clone(), writes, Arc::new(TcpConnector::new()));
    let dispatcher = tokio::spawn(async move { dispatcher.run(events_rx).await });

    let handle = ClientHandle::new(events_tx);
    for network in config.networks {
        handle.connect(network).await?;
    }

    let interrupt = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = interrupt.shutdown().await;
        }
    });

    dispatcher.await??;
    writer.await?;
    info!("Stopped");
    Ok(())
}
