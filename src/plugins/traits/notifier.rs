use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::models::ChangedItem;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationResult {
    /// False when the notifier skipped sending (nothing to report or not configured).
    pub delivered: bool,
    pub message_id: Option<String>,
}

impl NotificationResult {
    pub fn skipped() -> Self {
        Self {
            delivered: false,
            message_id: None,
        }
    }
}

/// Trait for delivering price-change alerts.
///
/// Implementations must treat an empty change list as a no-op and report
/// delivery failures as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifierPlugin: Send + Sync {
    async fn notify(&self, changes: &[ChangedItem]) -> Result<NotificationResult>;
}
