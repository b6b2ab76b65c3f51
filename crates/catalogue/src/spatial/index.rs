//! R-tree index over stop positions for radius and nearest-neighbor queries.
//!
//! ## Two-Stage Filtering
//!
//! Radius queries use a two-stage filtering approach:
//! 1. **R-tree filter**: Euclidean distance in degree space for fast
//!    approximate candidate selection
//! 2. **Haversine filter**: accurate geodesic distance on the candidates
//!
//! The index is a read-only snapshot: build it once registration is
//! complete, rebuild after further mutation. Placeholder stops with no
//! coordinate are not indexed.

use geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::catalogue::store::StopStore;
use crate::identifiers::StopIdentifier;
use crate::spatial::queries::{haversine_distance, meters_to_degrees_approx};

#[derive(Clone)]
pub struct StopNode {
    pub name: StopIdentifier,
    pub location: Point,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(name: StopIdentifier, location: Point) -> Self {
        Self {
            name,
            location,
            point: [location.x(), location.y()],
        }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial snapshot of every stop with a known coordinate.
#[derive(Clone)]
pub struct StopIndex {
    tree: RTree<StopNode>,
}

impl StopIndex {
    /// Bulk-load the index from the store. Stops whose coordinate was never
    /// set are skipped; they have no position to index.
    pub fn build(store: &StopStore) -> Self {
        let nodes: Vec<StopNode> = store
            .iter()
            .filter_map(|(name, record)| {
                record
                    .coords()
                    .map(|coords| StopNode::new(name.clone(), coords.to_point()))
            })
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Find stops within `radius_m` meters of a degree-space point,
    /// unordered.
    pub fn stops_near(&self, point: Point, radius_m: f64) -> Vec<StopIdentifier> {
        // Validate radius is positive
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        // Longitude degrees shrink with latitude, so widen the prefilter
        // accordingly; the haversine stage discards the excess.
        let lat_cos = point.y().to_radians().cos().abs().max(0.01);
        let radius_deg = meters_to_degrees_approx(radius_m) / lat_cos;

        self.tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter(|node| haversine_distance(point, node.location) <= radius_m)
            .map(|node| node.name.clone())
            .collect()
    }

    /// Find the `n` nearest stops to a point, closest first.
    pub fn nearest_stops(&self, point: Point, n: usize) -> Vec<StopIdentifier> {
        self.tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| node.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
