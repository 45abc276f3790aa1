use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Item;

/// Last-seen state of one tracked listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotEntry {
    pub name: String,
    pub size: String,
    pub price: Decimal,
    pub url: String,
}

/// Persisted mapping from item key to its last-seen state.
///
/// Serialises as a flat JSON object. Keys are kept sorted so repeated runs
/// over the same page produce the same file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, SnapshotEntry>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SnapshotEntry> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: String, entry: SnapshotEntry) -> Option<SnapshotEntry> {
        self.0.insert(key, entry)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Item> for SnapshotEntry {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            size: item.size.clone(),
            price: item.price,
            url: item.url.clone(),
        }
    }
}

impl FromIterator<(String, SnapshotEntry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SnapshotEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
