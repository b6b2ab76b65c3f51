//! Spatial indexing and query utilities over the stop set.

pub mod index;
pub mod queries;

pub use index::StopIndex;
pub use queries::haversine_distance;
