//! Core dashboard logic: configuration, instrument resolution, fetching and
//! the joined table

pub mod assembler;
pub mod cache;
pub mod category;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod log;
pub mod period;
pub mod price;
pub mod resolver;
pub mod selection;
pub mod table;
pub mod theme;

// Re-export main types for cleaner imports
pub use category::Category;
pub use period::LookbackPeriod;
pub use price::{PriceSeries, SeriesProvider};
