//! Catalogue data models and types.

pub mod types;

// Re-exports for convenience
pub use types::{BusStats, CatalogueError, Coordinate, Result, EARTH_RADIUS_M};
