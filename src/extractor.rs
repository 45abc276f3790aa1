use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

use crate::config::ExtractorConfig;
use crate::models::Item;
use crate::plugins::TrackerPlugin;
use crate::plugins::trackers::{PriceTracker, SizeTracker};
use crate::utils::error::AppError;
use crate::Result;

/// One way of naming a listing block. Strategies are tried in order and the
/// first non-empty result wins.
#[derive(Debug, Clone)]
pub enum NameStrategy {
    /// Text of the first element matching a dedicated name selector.
    Labeled(Selector),
    /// First element matching `selector` whose text contains `fragment`.
    KeywordTag { selector: Selector, fragment: String },
    /// Leading characters of the whole block text.
    TextPrefix(usize),
}

impl NameStrategy {
    fn apply(&self, block: ElementRef<'_>, block_text: &str) -> Option<String> {
        match self {
            NameStrategy::Labeled(selector) => block
                .select(selector)
                .next()
                .map(|el| flatten_text(el, ""))
                .filter(|name| !name.is_empty()),
            NameStrategy::KeywordTag { selector, fragment } => block
                .select(selector)
                .map(|el| flatten_text(el, ""))
                .find(|text| text.contains(fragment.as_str())),
            NameStrategy::TextPrefix(max_chars) => {
                let prefix: String = block_text.chars().take(*max_chars).collect();
                (!prefix.is_empty()).then_some(prefix)
            }
        }
    }
}

/// Turns search-result markup into tracked items.
pub struct ListingExtractor {
    base_url: Url,
    candidate_selectors: Vec<Selector>,
    product_keywords: Vec<String>,
    name_strategies: Vec<NameStrategy>,
    price_selector: Selector,
    link_selector: Selector,
    prices: PriceTracker,
    sizes: SizeTracker,
}

impl ListingExtractor {
    pub fn new(search_url: &str, config: &ExtractorConfig) -> Result<Self> {
        let base_url = Url::parse(search_url).map_err(|e| AppError::Parse {
            message: format!("Invalid search URL '{}': {}", search_url, e),
        })?;

        let candidate_selectors = config
            .candidate_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        let name_strategies = vec![
            NameStrategy::Labeled(parse_selector(&config.name_selector)?),
            NameStrategy::KeywordTag {
                selector: parse_selector(&config.name_tags)?,
                fragment: config.name_fragment.clone(),
            },
            NameStrategy::TextPrefix(config.name_fallback_chars),
        ];

        Ok(Self {
            base_url,
            candidate_selectors,
            product_keywords: config.product_keywords.clone(),
            name_strategies,
            price_selector: parse_selector(&config.price_selector)?,
            link_selector: parse_selector(&config.link_selector)?,
            prices: PriceTracker::new(),
            sizes: SizeTracker::new(config.small_sizes.clone()),
        })
    }

    /// Replaces the naming chain.
    pub fn with_name_strategies(mut self, strategies: Vec<NameStrategy>) -> Self {
        self.name_strategies = strategies;
        self
    }

    pub fn extract(&self, html: &str) -> Vec<Item> {
        let document = Html::parse_document(html);
        let blocks = self.candidate_blocks(&document);

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        let mut rejected = 0usize;
        let mut duplicates = 0usize;

        for block in blocks.iter().copied() {
            let Some(item) = self.extract_item(block) else {
                rejected += 1;
                continue;
            };

            if !seen.insert(item.key.clone()) {
                duplicates += 1;
                continue;
            }
            items.push(item);
        }

        debug!(
            blocks = blocks.len(),
            accepted = items.len(),
            rejected,
            duplicates,
            "Extracted listings"
        );

        items
    }

    fn candidate_blocks<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.candidate_selectors
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|blocks| !blocks.is_empty())
            .unwrap_or_default()
    }

    fn extract_item(&self, block: ElementRef<'_>) -> Option<Item> {
        let text = flatten_text(block, " ");
        if !self
            .product_keywords
            .iter()
            .any(|keyword| text.contains(keyword.as_str()))
        {
            return None;
        }

        let name = self
            .name_strategies
            .iter()
            .find_map(|strategy| strategy.apply(block, &text))?;

        let Some(size) = self.sizes.parse(&text) else {
            debug!(tracker = self.sizes.name(), kind = self.sizes.plugin_type(), %name, "Skipping listing without a tracked size");
            return None;
        };

        let price_text = block
            .select(&self.price_selector)
            .next()
            .map(|el| flatten_text(el, " "))
            .unwrap_or_else(|| text.clone());
        let Some(price) = self.prices.parse(&price_text) else {
            debug!(tracker = self.prices.name(), kind = self.prices.plugin_type(), %name, "Skipping listing without a price");
            return None;
        };

        Some(Item::new(self.resolve_link(block), name, size, price))
    }

    fn resolve_link(&self, block: ElementRef<'_>) -> String {
        block
            .select(&self.link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.base_url.join(href).ok())
            .unwrap_or_else(|| self.base_url.clone())
            .to_string()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Parse {
        message: format!("Invalid selector '{}': {:?}", selector, e),
    })
}

/// Trimmed, non-empty text nodes joined with `separator`.
fn flatten_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
