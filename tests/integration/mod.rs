// Shared helpers for the integration tests

pub mod pipeline_tests;

use async_trait::async_trait;
use squish_watcher::AppConfig;
use squish_watcher::models::ChangedItem;
use squish_watcher::plugins::traits::{NotificationResult, NotifierPlugin};
use std::path::Path;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/q/squishmallow";

/// Configuration pointing at a mock search page and a temporary snapshot file.
pub fn test_config(server: &MockServer, state: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.scraper.search_url = format!("{}{}", server.uri(), SEARCH_PATH);
    config.scraper.request_timeout = 5;
    config.state.path = state.to_path_buf();
    config
}

/// A product card the way the retailer renders it.
pub fn product_card(slug: &str, name: &str, price: &str) -> String {
    format!(
        r#"<div data-qa="product-card">
             <a href="/p/{slug}"><span data-qa="product-name">{name}</span></a>
             <div data-qa="product-price">{price}</div>
           </div>"#
    )
}

pub fn search_page(cards: &[String]) -> String {
    format!(
        "<html><body><h1>Results for squishmallow</h1>{}</body></html>",
        cards.join("\n")
    )
}

/// Replaces whatever the server returned before with `body`.
pub async fn serve_page(server: &MockServer, body: String) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Notifier that records every change list it is handed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub calls: Arc<Mutex<Vec<Vec<ChangedItem>>>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<Vec<ChangedItem>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierPlugin for RecordingNotifier {
    async fn notify(&self, changes: &[ChangedItem]) -> squish_watcher::Result<NotificationResult> {
        self.calls.lock().unwrap().push(changes.to_vec());
        Ok(NotificationResult {
            delivered: true,
            message_id: Some(format!("recorded-{}", changes.len())),
        })
    }
}
