pub mod item;
pub mod snapshot;
pub mod price_change;

// Re-exports for convenience
pub use item::*;
pub use snapshot::*;
pub use price_change::*;
