// Pipeline tests with an injected notifier

use super::*;
use squish_watcher::extractor::ListingExtractor;
use squish_watcher::scraper::WebScraper;
use squish_watcher::store::SnapshotStore;
use squish_watcher::{AppError, Watcher};
use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;
use wiremock::MockServer;

fn watcher_with(config: &AppConfig, notifier: RecordingNotifier) -> Watcher {
    Watcher::new(
        WebScraper::new(&config.scraper).unwrap(),
        ListingExtractor::new(&config.scraper.search_url, &config.extractor).unwrap(),
        SnapshotStore::new(config.state.path.clone()),
        Box::new(notifier),
    )
}

#[tokio::test]
async fn test_first_run_is_suppressed_then_changes_alert() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir.path().join("last_prices.json"));
    let notifier = RecordingNotifier::default();

    serve_page(
        &server,
        search_page(&[
            product_card("cam", "Squishmallow Cam 8 in", "$10.00"),
            product_card("wendy", "Squishmallow Wendy 5 in", "$6.99"),
        ]),
    )
    .await;
    let first = watcher_with(&config, notifier.clone()).run().await.unwrap();

    assert!(first.first_run);
    assert!(notifier.calls().is_empty());

    serve_page(
        &server,
        search_page(&[
            product_card("cam", "Squishmallow Cam 8 in", "$12.50"),
            product_card("wendy", "Squishmallow Wendy 5 in", "$6.99"),
            product_card("hoot", "Squishmallow Hoot 7 in", "$8.99"),
        ]),
    )
    .await;
    let second = watcher_with(&config, notifier.clone()).run().await.unwrap();

    assert_eq!(second.items_found, 3);
    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].name, "Squishmallow Cam 8 in");
    assert_eq!(calls[0][0].old_price, Decimal::from_str("10.00").unwrap());
    assert_eq!(calls[0][0].price, Decimal::from_str("12.50").unwrap());
}

#[tokio::test]
async fn test_empty_previous_snapshot_never_alerts() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("last_prices.json");
    let config = test_config(&server, &state);
    let notifier = RecordingNotifier::default();

    // An earlier run that found nothing leaves an empty snapshot behind
    SnapshotStore::new(&state)
        .save(&Default::default())
        .await
        .unwrap();

    serve_page(
        &server,
        search_page(&[product_card("cam", "Squishmallow Cam 8 in", "$10.00")]),
    )
    .await;
    let report = watcher_with(&config, notifier.clone()).run().await.unwrap();

    assert!(report.first_run);
    assert!(notifier.calls().is_empty());
    assert_eq!(SnapshotStore::new(&state).load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_server_error_aborts_before_save() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("last_prices.json");
    let config = test_config(&server, &state);

    // No mock mounted: wiremock answers 404
    let result = watcher_with(&config, RecordingNotifier::default()).run().await;

    assert!(matches!(result, Err(AppError::Fetch { .. })));
    assert!(!state.exists());
}
