use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub changed: bool,
    pub change_type: ChangeType,
    pub difference: Decimal,
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeType {
    Increased,
    Decreased,
    Unchanged,
}

/// Trait for value trackers that pull one typed value out of listing text.
pub trait TrackerPlugin: Send + Sync {
    type Value;

    /// Plugin metadata
    fn name(&self) -> &str;
    fn plugin_type(&self) -> &str;

    /// Returns `None` when the text carries no acceptable value.
    fn parse(&self, text: &str) -> Option<Self::Value>;
}
