//! Route topology: how a raw stop sequence turns into route statistics.
//!
//! Exactly two shapes exist in the domain. A route whose stop list ends on
//! its starting stop is a closed loop traversed once; any other list is an
//! open path traversed out and back. The shape is decided per bus from the
//! list itself, at registration time.

use std::collections::HashSet;

use crate::identifiers::*;
use crate::models::types::Result;

use super::store::StopStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTopology {
    /// Closed loop; the input repeats the first stop at the end.
    Circular,
    /// Open path driven there and back along the same stops.
    LinearRoundTrip,
}

impl RouteTopology {
    /// Detect the topology from the shape of the stop list.
    pub fn of(stops: &[StopIdentifier]) -> Self {
        match (stops.first(), stops.last()) {
            (Some(first), Some(last)) if stops.len() > 1 && first == last => Self::Circular,
            _ => Self::LinearRoundTrip,
        }
    }

    /// Number of stops a vehicle visits over one full run of the route.
    pub fn stop_count(&self, stops: &[StopIdentifier]) -> usize {
        match self {
            Self::Circular => stops.len(),
            // Out and back, the turnaround stop counted once.
            Self::LinearRoundTrip => (stops.len() * 2).saturating_sub(1),
        }
    }

    /// Number of distinct stops on the route, identical for both shapes.
    pub fn unique_stop_count(stops: &[StopIdentifier]) -> usize {
        stops.iter().collect::<HashSet<_>>().len()
    }

    /// Sum the declared road distance and the straight-line geographic
    /// distance over the route, in meters.
    ///
    /// Circular routes accumulate each consecutive pair once; round trips
    /// accumulate both directed road distances per pair and double the geo
    /// leg. A consecutive pair with no declared road distance in the store
    /// is a contract violation and aborts with `UndefinedDistance`.
    pub fn route_distances(
        &self,
        stops: &[StopIdentifier],
        store: &StopStore,
    ) -> Result<(f64, f64)> {
        let mut road_m = 0.0;
        let mut geo_m = 0.0;
        for pair in stops.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let leg = store
                .coords_or_nan(from)
                .great_circle_to(&store.coords_or_nan(to));
            match self {
                Self::Circular => {
                    road_m += store.distance(from, to)?;
                    geo_m += leg;
                }
                Self::LinearRoundTrip => {
                    road_m += store.distance(from, to)? + store.distance(to, from)?;
                    geo_m += 2.0 * leg;
                }
            }
        }
        Ok((road_m, geo_m))
    }

    /// Record `bus` in the reverse index of every stop it visits. The same
    /// for both shapes; duplicate stops collapse in the per-stop set.
    pub fn register_buses(stops: &[StopIdentifier], bus: &BusIdentifier, store: &mut StopStore) {
        for stop in stops {
            store.add_bus_to_stop(stop, bus);
        }
    }
}
