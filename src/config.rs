use config::{Config, Environment, File};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use validator::Validate;

use crate::utils::error::AppError;

pub const DEFAULT_SEARCH_URL: &str = "https://www.frysfood.com/q/squishmallow";
pub const DEFAULT_STATE_FILE: &str = "last_prices.json";

/// Environment variables carrying the SMTP login, sender and alert recipient.
pub const EMAIL_USER_VAR: &str = "EMAIL_USER";
pub const EMAIL_PASS_VAR: &str = "EMAIL_PASS";
pub const ALERT_TO_VAR: &str = "ALERT_TO";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub scraper: ScraperConfig,
    #[validate(nested)]
    pub extractor: ExtractorConfig,
    pub state: StateConfig,
    #[validate(nested)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScraperConfig {
    #[validate(url)]
    pub search_url: String,
    #[validate(length(min = 1))]
    pub user_agent: String,
    /// Seconds.
    #[validate(range(min = 1))]
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractorConfig {
    /// Tried in order; the first selector matching anything supplies the listing blocks.
    #[validate(length(min = 1))]
    pub candidate_selectors: Vec<String>,
    #[validate(length(min = 1))]
    pub product_keywords: Vec<String>,
    pub name_selector: String,
    pub name_tags: String,
    pub name_fragment: String,
    #[validate(range(min = 1))]
    pub name_fallback_chars: usize,
    pub price_selector: String,
    pub link_selector: String,
    /// Accepted size labels, first substring match wins.
    #[validate(length(min = 1))]
    pub small_sizes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NotificationsConfig {
    #[validate(nested)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SmtpConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Checked when an alert is built, not at load time.
    pub username: Option<String>,
    pub password: Option<String>,
    pub to_address: Option<String>,
}

/// Login, password and recipient, only available when all three are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub to_address: &'a str,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            user_agent: "Mozilla/5.0 (compatible; PriceTrackerBot/1.0)".to_string(),
            request_timeout: 30,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            candidate_selectors: vec![
                r#"[data-qa="product-card"], div.ProductCard, li"#.to_string(),
                "li".to_string(),
            ],
            product_keywords: vec!["Squishmallow".to_string(), "Squishmallows".to_string()],
            name_selector: r#"[data-qa="product-name"]"#.to_string(),
            name_tags: "h2, h3, h4, strong, a".to_string(),
            name_fragment: "Squish".to_string(),
            name_fallback_chars: 80,
            price_selector: r#"[data-qa="product-price"], [class*="Price"]"#.to_string(),
            link_selector: "a[href]".to_string(),
            small_sizes: ["2.5 in", "4 in", "5 in", "6 in", "7 in", "8 in"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExtractorConfig {
    fn selectors(&self) -> impl Iterator<Item = &String> {
        self.candidate_selectors.iter().chain([
            &self.name_selector,
            &self.name_tags,
            &self.price_selector,
            &self.link_selector,
        ])
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: None,
            password: None,
            to_address: None,
        }
    }
}

impl SmtpConfig {
    pub fn credentials(&self) -> Option<SmtpCredentials<'_>> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        Some(SmtpCredentials {
            username: present(&self.username)?,
            password: present(&self.password)?,
            to_address: present(&self.to_address)?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::load(|key| env::var(key).ok())
    }

    /// Builds the layered configuration, reading the credential variables through `lookup`.
    pub fn load<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s = Config::builder()
            // Start with the built-in defaults
            .add_source(Config::try_from(&AppConfig::default())?)
            // Add local config (ignored by git)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix "SQUISH_"
            .add_source(Environment::with_prefix("SQUISH").separator("__"))
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        config.apply_credentials(lookup);
        config.check()?;
        Ok(config)
    }

    /// Overlays `EMAIL_USER`, `EMAIL_PASS` and `ALERT_TO`. Empty values count as unset.
    pub fn apply_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let smtp = &mut self.notifications.smtp;
        for (var, slot) in [
            (EMAIL_USER_VAR, &mut smtp.username),
            (EMAIL_PASS_VAR, &mut smtp.password),
            (ALERT_TO_VAR, &mut smtp.to_address),
        ] {
            if let Some(value) = lookup(var) {
                *slot = Some(value);
            }
            if slot.as_deref().is_some_and(str::is_empty) {
                *slot = None;
            }
        }
    }

    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        for selector in self.extractor.selectors() {
            Selector::parse(selector).map_err(|e| AppError::Parse {
                message: format!("Invalid selector '{}': {:?}", selector, e),
            })?;
        }

        Ok(())
    }
}
