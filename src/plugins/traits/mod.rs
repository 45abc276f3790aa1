pub mod tracker;
pub mod notifier;

pub use tracker::{TrackerPlugin, ComparisonResult, ChangeType};
pub use notifier::{NotifierPlugin, NotificationResult};
