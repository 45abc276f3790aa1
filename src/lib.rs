pub mod config;
pub mod diff;
pub mod extractor;
pub mod models;
pub mod plugins;
pub mod scraper;
pub mod store;
pub mod utils;
pub mod watcher;

// Re-export commonly used types
pub use config::AppConfig;
pub use utils::error::AppError;
pub use watcher::{RunReport, Watcher};

pub type Result<T> = std::result::Result<T, AppError>;
