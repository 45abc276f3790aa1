use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A listing accepted from the search page during the current run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Resolved product URL, the identity used for dedup and snapshot keys.
    pub key: String,
    pub name: String,
    pub size: String,
    pub price: Decimal,
    pub url: String,
}

impl Item {
    pub fn new(url: String, name: String, size: String, price: Decimal) -> Self {
        Self {
            key: url.clone(),
            name,
            size,
            price,
            url,
        }
    }
}
