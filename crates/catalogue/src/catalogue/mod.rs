//! The in-memory catalogue: stop storage, route topologies, orchestration.

pub mod manager;
pub mod store;
pub mod topology;

pub use manager::RouteManager;
pub use store::{StopRecord, StopStore};
pub use topology::RouteTopology;
