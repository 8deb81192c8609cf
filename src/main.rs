mod app;
mod config;
mod domain;
mod feed;
mod infrastructure;
mod pipeline;
mod report;
mod state;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::resolve_paths(&config.directories, &config.fallback)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::DashboardApp::initialize(config, paths, shutdown)?;
    app.run().await
}
