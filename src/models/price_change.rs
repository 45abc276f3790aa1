use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An item seen in both the previous and the current run at a different price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangedItem {
    pub name: String,
    pub size: String,
    pub url: String,
    pub old_price: Decimal,
    pub price: Decimal,
}
