use anyhow::Result;
use squish_watcher::{AppConfig, Watcher};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Pick up EMAIL_USER / EMAIL_PASS / ALERT_TO from a local .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("squish_watcher=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(
        url = %config.scraper.search_url,
        state = %config.state.path.display(),
        "Starting Squish Watcher run"
    );

    let report = Watcher::from_config(&config)?.run().await?;

    info!(
        items = report.items_found,
        changes = report.changes.len(),
        "Finished"
    );

    Ok(())
}
