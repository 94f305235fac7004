use std::sync::Arc;

use polymarket_mcp::config::Config;
use polymarket_mcp::server::Server;
use polymarket_mcp::venue::Venue;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
#[expect(clippy::exit, reason = "A bad configuration is fatal at startup")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol; logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match Config::global() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        funder = %config.funder_address,
        chain_id = config.chain_id,
        readonly = config.readonly,
        "polymarket-mcp starting"
    );

    let venue = Arc::new(Venue::new(config.clone())?);
    venue.initialize().await?;

    Server::new(venue).serve_stdio().await?;

    info!("polymarket-mcp stopped");
    Ok(())
}
