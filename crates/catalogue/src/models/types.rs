//! Core data types for the route catalogue.

use geo::Point;

use crate::identifiers::*;

/// Mean Earth radius in meters, used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ============================================================================
// Coordinates
// ============================================================================

/// A geographic position stored in radians.
///
/// Upstream data sources carry degrees; convert at the boundary with
/// [`Coordinate::from_degrees`]. Latitude is expected in [-π/2, π/2] and
/// longitude in [-π, π]; out-of-range or non-finite values are not rejected
/// and simply propagate into non-finite distances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude: latitude_deg.to_radians(),
            longitude: longitude_deg.to_radians(),
        }
    }

    /// Great-circle distance to `other` in meters, by the spherical law of
    /// cosines. Pure and allocation-free; non-finite inputs yield a
    /// non-finite result rather than an error.
    pub fn great_circle_to(&self, other: &Coordinate) -> f64 {
        (self.latitude.sin() * other.latitude.sin()
            + self.latitude.cos()
                * other.latitude.cos()
                * (self.longitude - other.longitude).abs().cos())
        .acos()
            * EARTH_RADIUS_M
    }

    /// Convert to a degree-space point (x = longitude, y = latitude) for the
    /// spatial index.
    pub fn to_point(&self) -> Point {
        Point::new(self.longitude.to_degrees(), self.latitude.to_degrees())
    }
}

// ============================================================================
// Bus statistics
// ============================================================================

/// Cached statistics for one registered bus route.
///
/// `route_distance` is the declared road distance in meters; `curvature` is
/// the ratio of road distance to straight-line geographic distance. A route
/// with no consecutive stop pairs has zero for both distances and a NaN
/// curvature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_distance: f64,
    pub curvature: f64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("no declared road distance from {from} to {to}")]
    UndefinedDistance {
        from: StopIdentifier,
        to: StopIdentifier,
    },
}

pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_great_circle_distance() {
        // Tolstopaltsevo to Marushkino, roughly 1.7 km apart
        let a = Coordinate::from_degrees(55.611087, 37.20829);
        let b = Coordinate::from_degrees(55.595884, 37.209755);

        assert_relative_eq!(a.great_circle_to(&b), 1693.0, max_relative = 1e-3);
    }

    #[test]
    fn test_great_circle_is_symmetric() {
        let a = Coordinate::from_degrees(55.574371, 37.6517);
        let b = Coordinate::from_degrees(55.581065, 37.64839);

        assert_eq!(a.great_circle_to(&b), b.great_circle_to(&a));
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let a = Coordinate::new(f64::NAN, f64::NAN);
        let b = Coordinate::from_degrees(55.595884, 37.209755);

        assert!(!a.great_circle_to(&b).is_finite());
    }

    #[test]
    fn test_to_point_round_trips_degrees() {
        let c = Coordinate::from_degrees(55.611087, 37.20829);
        let p = c.to_point();

        assert_relative_eq!(p.x(), 37.20829, epsilon = 1e-9);
        assert_relative_eq!(p.y(), 55.611087, epsilon = 1e-9);
    }
}
