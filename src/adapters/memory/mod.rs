//! In-memory adapters for the resource catalog facade.

pub mod catalog;
pub mod load_ratios;

pub use catalog::InMemoryResourceCatalog;
pub use load_ratios::StaticLoadRatios;
