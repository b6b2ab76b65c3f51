//! # route-catalogue
//!
//! In-memory model of a public-transit network: stops with coordinates and
//! pairwise road distances, buses as ordered stop sequences.
//!
//! ## Features
//!
//! - **Route statistics**: stop counts, road distance, and curvature per bus
//! - **Reverse lookup**: which buses serve a given stop
//! - **Two route shapes**: closed loops and linear round trips, detected
//!   from the stop list itself
//! - **Spatial queries**: R-tree index over stop positions
//!
//! Parsing and response formatting live with the consumer; this crate takes
//! already-typed records and hands back typed statistics. Apply all stop
//! definitions before registering the buses that reference them.
//!
//! ## Example
//!
//! ```
//! use route_catalogue::prelude::*;
//!
//! let mut manager = RouteManager::new();
//! manager.set_stop(
//!     "Tolstopaltsevo".into(),
//!     Coordinate::from_degrees(55.611087, 37.20829),
//!     vec![("Marushkino".into(), 3900.0)],
//! );
//! manager.set_stop(
//!     "Marushkino".into(),
//!     Coordinate::from_degrees(55.595884, 37.209755),
//!     vec![],
//! );
//!
//! // Open path, so the bus runs there and back.
//! let stops: Vec<StopIdentifier> = vec!["Tolstopaltsevo".into(), "Marushkino".into()];
//! manager.register_bus("750".into(), &stops).unwrap();
//!
//! let stats = manager.bus_stats(&"750".into()).unwrap();
//! assert_eq!(stats.stop_count, 3);
//! assert_eq!(stats.route_distance, 7800.0);
//! ```

pub mod catalogue;
pub mod identifiers;
pub mod models;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::{RouteManager, RouteTopology, StopRecord, StopStore};
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
    pub use crate::spatial::StopIndex;
}

// Module declarations
pub use prelude::*;
