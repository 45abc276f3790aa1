use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::utils::error::AppError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub status: u16,
    pub response_time_ms: u64,
    pub final_url: String, // After redirects
}

/// Fetches the search-results page. One GET per run, no retries.
pub struct WebScraper {
    client: Client,
    search_url: Url,
}

impl WebScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let search_url = Url::parse(&config.search_url).map_err(|e| AppError::Parse {
            message: format!("Invalid search URL '{}': {}", config.search_url, e),
        })?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub async fn fetch(&self) -> Result<FetchedPage> {
        let start_time = Instant::now();
        debug!(url = %self.search_url, "Fetching search page");

        let response = self
            .client
            .get(self.search_url.clone())
            .send()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.search_url, %status, "Search page returned an error status");
            return Err(self.fetch_error(format!("HTTP {}", status)));
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| self.fetch_error(format!("Failed to read body: {}", e)))?;

        let page = FetchedPage {
            html,
            status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis() as u64,
            final_url,
        };

        debug!(
            status = page.status,
            bytes = page.html.len(),
            response_time_ms = page.response_time_ms,
            "Fetched search page"
        );

        Ok(page)
    }

    fn fetch_error(&self, message: String) -> AppError {
        AppError::Fetch {
            url: self.search_url.to_string(),
            message,
        }
    }
}
