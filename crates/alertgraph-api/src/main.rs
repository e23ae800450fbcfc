use alertgraph_api::{AppState, Server};
use alertgraph_core::ConfigManager;
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alertgraph-api")]
#[command(about = "AlertGraph API - manager alert queries over the reporting hierarchy", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding default/<env>/local configuration files
    #[arg(long, env = "ALERTGRAPH_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration environment (development, production, ...)
    #[arg(long, env = "APP_ENV")]
    env: Option<String>,

    /// JSON seed document with employees and alerts
    #[arg(long, env = "ALERTGRAPH_SEED")]
    seed: Option<PathBuf>,

    /// Bind host (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::load(cli.config_dir, cli.env)?;
    {
        let settings = config.settings_mut();
        if let Some(seed) = cli.seed {
            settings.data.seed_path = Some(seed);
        }
        if let Some(host) = cli.host {
            settings.server.host = host;
        }
        if let Some(port) = cli.port {
            settings.server.port = port;
        }
        settings.validate()?;
    }
    let settings = config.settings();

    let level = &settings.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "alertgraph_api={level},alertgraph_graph={level},tower_http={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        env = config.env(),
        config_dir = ?config.config_dir(),
        "Configuration loaded"
    );

    let addr: SocketAddr = settings
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.bind_address()))?;

    let state = AppState::from_settings(settings)
        .await
        .context("initializing application state")?;
    Server::new(addr, state).run().await?;
    Ok(())
}
