//! Stop storage: coordinates, the directed road-distance graph, and the
//! reverse index of buses serving each stop.

use std::collections::{BTreeSet, HashMap};

use crate::identifiers::*;
use crate::models::types::{CatalogueError, Coordinate, Result};

/// Everything known about one named stop.
///
/// A stop can exist before its own definition arrives: naming it as a
/// neighbor in another stop's definition, or in a bus's stop list, creates a
/// placeholder record with no coordinate. Distances are directed; A→B and
/// B→A are independent entries.
#[derive(Clone, Debug, Default)]
pub struct StopRecord {
    coords: Option<Coordinate>,
    distances: HashMap<StopIdentifier, f64>,
    buses: BTreeSet<BusIdentifier>,
}

impl StopRecord {
    pub fn coords(&self) -> Option<Coordinate> {
        self.coords
    }

    /// Coordinate for distance math. A placeholder with no coordinate yields
    /// a NaN position, so a geo distance computed against it is non-finite
    /// instead of panicking.
    pub(crate) fn coords_or_nan(&self) -> Coordinate {
        self.coords
            .unwrap_or_else(|| Coordinate::new(f64::NAN, f64::NAN))
    }

    /// Declared road distance to a neighboring stop, if any.
    pub fn distance_to(&self, to: &StopIdentifier) -> Option<f64> {
        self.distances.get(to).copied()
    }

    /// Buses serving this stop, in lexicographic order.
    pub fn buses(&self) -> &BTreeSet<BusIdentifier> {
        &self.buses
    }
}

/// Owner of all [`StopRecord`]s, keyed by stop name.
#[derive(Clone, Debug, Default)]
pub struct StopStore {
    stops: HashMap<StopIdentifier, StopRecord>,
}

impl StopStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a stop: set its coordinate and its declared
    /// distances to neighboring stops.
    ///
    /// Declared entries always overwrite, including any previously
    /// synthesized reverse entry. For each declared `name→target` where
    /// `target→name` was never recorded, a reverse entry with the same value
    /// is synthesized; symmetry is assumed until the target declares its own
    /// value, which then stands permanently.
    pub fn set_stop(
        &mut self,
        name: StopIdentifier,
        coords: Coordinate,
        distances: Vec<(StopIdentifier, f64)>,
    ) {
        tracing::trace!(stop = %name, neighbors = distances.len(), "set stop");
        self.stops.entry(name.clone()).or_default().coords = Some(coords);
        for (target, meters) in distances {
            self.stops
                .entry(target.clone())
                .or_default()
                .distances
                .entry(name.clone())
                .or_insert(meters);
            self.stops
                .entry(name.clone())
                .or_default()
                .distances
                .insert(target, meters);
        }
    }

    /// Record that `bus` serves `stop`, creating a placeholder if the stop
    /// is not yet defined.
    pub fn add_bus_to_stop(&mut self, stop: &StopIdentifier, bus: &BusIdentifier) {
        self.stops
            .entry(stop.clone())
            .or_default()
            .buses
            .insert(bus.clone());
    }

    pub fn get(&self, name: &StopIdentifier) -> Option<&StopRecord> {
        self.stops.get(name)
    }

    pub fn coords(&self, name: &StopIdentifier) -> Option<Coordinate> {
        self.stops.get(name).and_then(|record| record.coords)
    }

    pub(crate) fn coords_or_nan(&self, name: &StopIdentifier) -> Coordinate {
        self.stops
            .get(name)
            .map(StopRecord::coords_or_nan)
            .unwrap_or_else(|| Coordinate::new(f64::NAN, f64::NAN))
    }

    /// Declared road distance from `from` to `to`.
    ///
    /// Consecutive stops of a registered bus must have a declared (or
    /// synthesized) distance; a missing entry is a contract violation by the
    /// data producer and is reported as [`CatalogueError::UndefinedDistance`].
    pub fn distance(&self, from: &StopIdentifier, to: &StopIdentifier) -> Result<f64> {
        self.stops
            .get(from)
            .and_then(|record| record.distance_to(to))
            .ok_or_else(|| CatalogueError::UndefinedDistance {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Buses serving a stop. `None` means the stop was never mentioned by
    /// any definition; an empty set means it exists but no bus serves it.
    pub fn buses(&self, name: &StopIdentifier) -> Option<&BTreeSet<BusIdentifier>> {
        self.stops.get(name).map(StopRecord::buses)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StopIdentifier, &StopRecord)> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord() -> Coordinate {
        Coordinate::from_degrees(55.6, 37.2)
    }

    #[test]
    fn test_symmetry_fallback() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![("B".into(), 3900.0)]);

        assert_eq!(store.distance(&"A".into(), &"B".into()).unwrap(), 3900.0);
        assert_eq!(store.distance(&"B".into(), &"A".into()).unwrap(), 3900.0);
    }

    #[test]
    fn test_explicit_value_beats_later_fallback() {
        let mut store = StopStore::new();
        store.set_stop("B".into(), coord(), vec![("A".into(), 100.0)]);
        store.set_stop("A".into(), coord(), vec![("B".into(), 250.0)]);

        // A's definition overwrites its own direction but must not disturb
        // B's explicit declaration.
        assert_eq!(store.distance(&"A".into(), &"B".into()).unwrap(), 250.0);
        assert_eq!(store.distance(&"B".into(), &"A".into()).unwrap(), 100.0);
    }

    #[test]
    fn test_explicit_value_overwrites_earlier_fallback() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![("B".into(), 100.0)]);
        // B→A was synthesized as 100; B's own declaration replaces it.
        store.set_stop("B".into(), coord(), vec![("A".into(), 999.0)]);

        assert_eq!(store.distance(&"B".into(), &"A".into()).unwrap(), 999.0);
        assert_eq!(store.distance(&"A".into(), &"B".into()).unwrap(), 100.0);
    }

    #[test]
    fn test_redefinition_keeps_synthesized_peer_entry() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![("B".into(), 100.0)]);
        store.set_stop("A".into(), coord(), vec![("B".into(), 150.0)]);

        assert_eq!(store.distance(&"A".into(), &"B".into()).unwrap(), 150.0);
        // The synthesized reverse entry is not refreshed once present.
        assert_eq!(store.distance(&"B".into(), &"A".into()).unwrap(), 100.0);
    }

    #[test]
    fn test_neighbor_becomes_placeholder() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![("Ghost".into(), 500.0)]);

        let record = store.get(&"Ghost".into()).unwrap();
        assert!(record.coords().is_none());
        assert!(record.buses().is_empty());
        assert!(!store.coords_or_nan(&"Ghost".into()).latitude.is_finite());
    }

    #[test]
    fn test_undefined_distance_error_names_both_stops() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![]);

        let err = store.distance(&"A".into(), &"B".into()).unwrap_err();
        match err {
            CatalogueError::UndefinedDistance { from, to } => {
                assert_eq!(from.as_str(), "A");
                assert_eq!(to.as_str(), "B");
            }
        }
    }

    #[test]
    fn test_buses_none_vs_empty() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), coord(), vec![]);

        assert!(store.buses(&"A".into()).unwrap().is_empty());
        assert!(store.buses(&"Nowhere".into()).is_none());

        store.add_bus_to_stop(&"A".into(), &"750".into());
        let buses: Vec<&str> = store
            .buses(&"A".into())
            .unwrap()
            .iter()
            .map(|b| b.as_str())
            .collect();
        assert_eq!(buses, vec!["750"]);
    }

    #[test]
    fn test_redefinition_overwrites_coords() {
        let mut store = StopStore::new();
        store.set_stop("A".into(), Coordinate::from_degrees(10.0, 10.0), vec![]);
        store.set_stop("A".into(), Coordinate::from_degrees(20.0, 20.0), vec![]);

        let c = store.coords(&"A".into()).unwrap();
        assert_eq!(c, Coordinate::from_degrees(20.0, 20.0));
    }
}
