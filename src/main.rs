use anyhow::Result;
use dotenvy::dotenv;
use tracing::error;

use blockpi_exporter::app::{Config, run};
use blockpi_exporter::infra::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Tracing is not installed yet; a returned error is printed to stderr
    // and no port is bound.
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    run(config)
        .await
        .inspect_err(|e| error!(error = %e, "Exporter failed"))?;

    Ok(())
}
