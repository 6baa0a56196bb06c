use std::sync::Arc;

use anyhow::{Context, Result};
use categorist::config::Config;
use categorist::logger;
use categorist::source::{DataSource, SqliteSource};
use categorist::sync::{Action, ViewSynchronizer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    if let Some(path) = logger::init(&config.logging)? {
        log::info!("Logging to {}", path.display());
    }

    let source = SqliteSource::connect(&config.storage.database_url)
        .await
        .context("Failed to open task storage")?;
    let source: Arc<dyn DataSource> = Arc::new(source);

    let mut synchronizer = ViewSynchronizer::new(source, config.ui.is_compact());
    synchronizer.handle_action(Action::Load);
    synchronizer.settle().await;

    let snapshot = synchronizer.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize view snapshot")?
    );

    Ok(())
}
