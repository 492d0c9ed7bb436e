use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use confprogram::{pipeline, HttpSource, ScrapeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ScrapeConfig::default();
    let source = HttpSource::new(&config).context("Failed to build HTTP client")?;

    match pipeline::run(&source, &config).await {
        Ok(path) => {
            info!("Program written to {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            Err(e)
        }
    }
}
