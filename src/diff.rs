use tracing::info;

use crate::models::{ChangedItem, Item, Snapshot, SnapshotEntry};
use crate::plugins::trackers::PriceTracker;

/// Result of comparing the current run against the previous snapshot.
#[derive(Debug, Clone, Default)]
pub struct Diff {
    /// Everything observed in this run; replaces the previous snapshot wholesale.
    pub snapshot: Snapshot,
    pub changes: Vec<ChangedItem>,
}

/// Builds the new snapshot and collects items whose price moved.
///
/// Items missing from `old` are added silently and items no longer listed
/// simply drop out; neither counts as a change.
pub fn diff(old: &Snapshot, items: &[Item], prices: &PriceTracker) -> Diff {
    let mut result = Diff::default();

    for item in items {
        result.snapshot.insert(item.key.clone(), SnapshotEntry::from(item));

        let Some(previous) = old.get(&item.key) else {
            continue;
        };

        let comparison = prices.compare(previous.price, item.price);
        if !comparison.changed {
            continue;
        }

        info!(
            name = %item.name,
            size = %item.size,
            old_price = %previous.price,
            price = %item.price,
            direction = ?comparison.change_type,
            percent_change = comparison.percent_change,
            "Price changed"
        );

        result.changes.push(ChangedItem {
            name: item.name.clone(),
            size: item.size.clone(),
            url: item.url.clone(),
            old_price: previous.price,
            price: item.price,
        });
    }

    result
}
