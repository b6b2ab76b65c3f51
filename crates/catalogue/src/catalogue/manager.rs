//! Orchestration of stop storage and route topologies, plus the cache of
//! per-bus statistics.

use std::collections::{BTreeSet, HashMap};

use crate::identifiers::*;
use crate::models::types::{BusStats, Coordinate, Result};

use super::store::StopStore;
use super::topology::RouteTopology;

/// The catalogue's write and query surface.
///
/// Expected call order matches the data's dependency order: apply every stop
/// definition, then every bus registration, then queries. Registration
/// assumes the road distances its route needs are already in the store.
#[derive(Clone, Debug, Default)]
pub struct RouteManager {
    stops: StopStore,
    bus_stats: HashMap<BusIdentifier, BusStats>,
}

impl RouteManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a stop. See [`StopStore::set_stop`].
    pub fn set_stop(
        &mut self,
        name: StopIdentifier,
        coords: Coordinate,
        distances: Vec<(StopIdentifier, f64)>,
    ) {
        self.stops.set_stop(name, coords, distances);
    }

    /// Register a bus route and cache its statistics.
    ///
    /// The topology is chosen from the stop list's shape. Re-registering a
    /// bus name replaces its cached statistics wholesale. If a consecutive
    /// pair lacks a declared road distance the registration fails and the
    /// catalogue is left untouched.
    pub fn register_bus(&mut self, name: BusIdentifier, stops: &[StopIdentifier]) -> Result<()> {
        let topology = RouteTopology::of(stops);
        let (road_m, geo_m) = topology.route_distances(stops, &self.stops)?;
        let stats = BusStats {
            stop_count: topology.stop_count(stops),
            unique_stop_count: RouteTopology::unique_stop_count(stops),
            route_distance: road_m,
            curvature: road_m / geo_m,
        };
        tracing::debug!(
            bus = %name,
            ?topology,
            stop_count = stats.stop_count,
            route_distance = stats.route_distance,
            "registered bus"
        );
        self.bus_stats.insert(name.clone(), stats);
        RouteTopology::register_buses(stops, &name, &mut self.stops);
        Ok(())
    }

    /// Cached statistics for a bus, `None` if it was never registered.
    pub fn bus_stats(&self, name: &BusIdentifier) -> Option<&BusStats> {
        self.bus_stats.get(name)
    }

    /// Buses serving a stop, in lexicographic order. `None` if the stop was
    /// never mentioned; an empty set if it exists but no bus serves it.
    pub fn stop_buses(&self, name: &StopIdentifier) -> Option<&BTreeSet<BusIdentifier>> {
        self.stops.buses(name)
    }

    /// Read access to the underlying stop store, e.g. for building a
    /// spatial index once registration is complete.
    pub fn stops(&self) -> &StopStore {
        &self.stops
    }
}
