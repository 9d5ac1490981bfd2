use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pricewatch::config::AppConfig;
use pricewatch::fetch::PageFetcher;
use pricewatch::monitor::Monitor;
use pricewatch::notify::TelegramNotifier;
use pricewatch::registry;
use pricewatch::store::PriceStore;

#[derive(Parser)]
#[command(name = "pricewatch", version, about = "E-commerce price monitor")]
struct Cli {
    /// Product registry file (overrides configuration)
    #[arg(long, value_name = "FILE")]
    products: Option<PathBuf>,

    /// SQLite database URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single verification round and exit (population/backfill runs)
    Once,
    /// Run verification rounds until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pricewatch=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("loading configuration")?;
    if let Some(products) = cli.products {
        config.registry.path = products;
    }
    if let Some(database) = cli.database {
        config.database.url = database;
    }

    // The registry is the only fatal input: no product list, nothing to run.
    let products = registry::load(&config.registry.path).context("loading product registry")?;
    info!(products = products.len(), "starting pricewatch");

    let fetcher = PageFetcher::new(&config.fetch).context("building http client")?;
    let store = PriceStore::connect(&config.database.url)
        .await
        .context("opening price history")?;
    let notifier = TelegramNotifier::new(&config.telegram);
    let monitor = Monitor::new(products, fetcher, store, notifier, config.monitor);

    match cli.command.unwrap_or(Command::Watch) {
        Command::Once => {
            let summary = monitor.run_once().await;
            info!(
                recorded = summary.observations_recorded,
                alerts = summary.alerts_sent,
                failures = summary.failures,
                "single round complete"
            );
        }
        Command::Watch => {
            tokio::select! {
                _ = monitor.run_forever() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received, stopping");
                }
            }
        }
    }

    Ok(())
}
