use crate::plugins::traits::{ChangeType, ComparisonResult, TrackerPlugin};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

/// Parses dollar amounts with exactly two decimal digits, e.g. `$12.99`.
pub struct PriceTracker {
    price_regex: Regex,
}

impl Default for PriceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceTracker {
    pub fn new() -> Self {
        PriceTracker {
            price_regex: Regex::new(r"\$(\d+\.\d{2})").expect("price pattern is valid"),
        }
    }

    /// Exact decimal comparison, no tolerance.
    pub fn compare(&self, old: Decimal, new: Decimal) -> ComparisonResult {
        let change_type = if new > old {
            ChangeType::Increased
        } else if new < old {
            ChangeType::Decreased
        } else {
            ChangeType::Unchanged
        };

        let difference = new - old;
        let percent_change = if !old.is_zero() {
            (difference / old * Decimal::from(100)).to_f64()
        } else {
            None
        };

        ComparisonResult {
            changed: change_type != ChangeType::Unchanged,
            change_type,
            difference,
            percent_change,
        }
    }

    pub fn format(&self, price: Decimal) -> String {
        format!("${:.2}", price)
    }
}

impl TrackerPlugin for PriceTracker {
    type Value = Decimal;

    fn name(&self) -> &str {
        "Price Tracker"
    }

    fn plugin_type(&self) -> &str {
        "price"
    }

    fn parse(&self, text: &str) -> Option<Decimal> {
        let captures = self.price_regex.captures(text)?;
        Decimal::from_str(captures.get(1)?.as_str()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("$19.99", "19.99")]
    #[case("Sale $4.99 Reg $6.99", "4.99")]
    #[case("Squishmallow 8 in - $12.00 each", "12.00")]
    #[case("$1299.00", "1299.00")]
    fn test_price_parsing(#[case] text: &str, #[case] expected: &str) {
        let tracker = PriceTracker::new();
        assert_eq!(tracker.parse(text), Some(dec(expected)));
    }

    #[rstest]
    #[case("not a price")]
    #[case("$12")]
    #[case("$12.5")]
    #[case("12.50")]
    #[case("$1,299.99")]
    fn test_price_parsing_failure(#[case] text: &str) {
        let tracker = PriceTracker::new();
        assert_eq!(tracker.parse(text), None);
    }

    #[test]
    fn test_price_formatting() {
        let tracker = PriceTracker::new();
        assert_eq!(tracker.format(dec("12.5")), "$12.50");
        assert_eq!(tracker.format(dec("10")), "$10.00");
    }

    #[test]
    fn test_price_comparison_increase() {
        let tracker = PriceTracker::new();
        let result = tracker.compare(dec("10.00"), dec("12.50"));

        assert!(result.changed);
        assert_eq!(result.change_type, ChangeType::Increased);
        assert_eq!(result.difference, dec("2.50"));
        assert_eq!(result.percent_change, Some(25.0));
    }

    #[test]
    fn test_price_comparison_decrease() {
        let tracker = PriceTracker::new();
        let result = tracker.compare(dec("20.00"), dec("15.00"));

        assert!(result.changed);
        assert_eq!(result.change_type, ChangeType::Decreased);
        assert_eq!(result.percent_change, Some(-25.0));
    }

    #[test]
    fn test_price_comparison_ignores_scale() {
        let tracker = PriceTracker::new();
        let result = tracker.compare(dec("10"), dec("10.00"));

        assert!(!result.changed);
        assert_eq!(result.change_type, ChangeType::Unchanged);
    }

    #[test]
    fn test_price_comparison_from_zero() {
        let tracker = PriceTracker::new();
        let result = tracker.compare(Decimal::ZERO, dec("5.00"));

        assert!(result.changed);
        assert_eq!(result.percent_change, None);
    }
}
