// Tracker plugin implementations
pub mod price;
pub mod size;

pub use price::PriceTracker;
pub use size::SizeTracker;
