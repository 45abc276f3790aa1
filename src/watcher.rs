use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::diff::diff;
use crate::extractor::ListingExtractor;
use crate::models::ChangedItem;
use crate::plugins::notifiers::EmailNotifier;
use crate::plugins::trackers::PriceTracker;
use crate::plugins::traits::{NotificationResult, NotifierPlugin};
use crate::scraper::WebScraper;
use crate::store::SnapshotStore;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub items_found: usize,
    pub changes: Vec<ChangedItem>,
    /// The previous snapshot was empty, so alerts were suppressed.
    pub first_run: bool,
    /// `None` when no alert was attempted.
    pub notification: Option<NotificationResult>,
}

/// One scrape, diff, alert and save pass.
pub struct Watcher {
    scraper: WebScraper,
    extractor: ListingExtractor,
    store: SnapshotStore,
    notifier: Box<dyn NotifierPlugin>,
    prices: PriceTracker,
}

impl Watcher {
    pub fn new(
        scraper: WebScraper,
        extractor: ListingExtractor,
        store: SnapshotStore,
        notifier: Box<dyn NotifierPlugin>,
    ) -> Self {
        Self {
            scraper,
            extractor,
            store,
            notifier,
            prices: PriceTracker::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            WebScraper::new(&config.scraper)?,
            ListingExtractor::new(&config.scraper.search_url, &config.extractor)?,
            SnapshotStore::new(config.state.path.clone()),
            Box::new(EmailNotifier::new(config.notifications.smtp.clone())),
        ))
    }

    /// Runs once. Any fetch, state or notification failure aborts the run;
    /// the alert goes out before the snapshot is written, so a failed alert
    /// leaves the previous snapshot in place.
    pub async fn run(&self) -> Result<RunReport> {
        let old = self.store.load().await?;
        let page = self.scraper.fetch().await?;
        let items = self.extractor.extract(&page.html);

        info!(
            url = %self.scraper.search_url(),
            items = items.len(),
            tracked = old.len(),
            "Scraped search page"
        );

        let result = diff(&old, &items, &self.prices);
        let first_run = old.is_empty();

        let notification = if !first_run && !result.changes.is_empty() {
            Some(self.notifier.notify(&result.changes).await?)
        } else {
            None
        };

        self.store.save(&result.snapshot).await?;

        info!(
            items = items.len(),
            changes = result.changes.len(),
            first_run,
            alerted = notification.as_ref().is_some_and(|n| n.delivered),
            "Run complete"
        );

        Ok(RunReport {
            items_found: items.len(),
            changes: result.changes,
            first_run,
            notification,
        })
    }
}
