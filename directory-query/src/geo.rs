//! Geographic membership predicates over building coordinates.
//!
//! Radius membership uses a planar approximation: the Euclidean distance between two
//! (latitude, longitude) pairs in degrees, scaled by [`METERS_PER_DEGREE`]. It is only
//! accurate near the equator and over short spans; it is not a great-circle distance.
//! Rectangle membership is inclusive on every edge and does not wrap at ±180°.

use directory_shared::types::{BoundingBox, Building, GeoPoint};

/// Metres per degree used by the planar distance approximation.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Slack added around radius prefilter boxes so rounding never drops a point lying
/// exactly on the circle.
const PREFILTER_PADDING_DEGREES: f64 = 1e-9;

/// Planar distance in metres between two points.
pub fn planar_distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lon = a.longitude - b.longitude;
    (d_lat * d_lat + d_lon * d_lon).sqrt() * METERS_PER_DEGREE
}

/// Returns true if `building` lies within `radius_meters` of `center`, boundary included.
pub fn within_radius(center: GeoPoint, radius_meters: f64, building: &Building) -> bool {
    planar_distance_meters(center, building.coordinates()) <= radius_meters
}

/// Returns true if `building` lies inside `bounds`, boundary included.
pub fn within_rectangle(bounds: &BoundingBox, building: &Building) -> bool {
    bounds.lat_min <= building.latitude
        && building.latitude <= bounds.lat_max
        && bounds.lon_min <= building.longitude
        && building.longitude <= bounds.lon_max
}

/// The smallest box containing every point within `radius_meters` of `center`, padded
/// slightly. Used to narrow store reads before the exact radius check.
pub fn radius_bounds(center: GeoPoint, radius_meters: f64) -> BoundingBox {
    let span = radius_meters / METERS_PER_DEGREE + PREFILTER_PADDING_DEGREES;
    BoundingBox::new(
        center.latitude - span,
        center.latitude + span,
        center.longitude - span,
        center.longitude + span,
    )
}

/// A building membership predicate the service can push down to the store as a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoPredicate {
    Radius { center: GeoPoint, radius_meters: f64 },
    Rectangle(BoundingBox),
}

impl GeoPredicate {
    pub fn radius(latitude: f64, longitude: f64, radius_meters: f64) -> Self {
        Self::Radius {
            center: GeoPoint::new(latitude, longitude),
            radius_meters,
        }
    }

    pub fn rectangle(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self::Rectangle(BoundingBox::new(lat_min, lat_max, lon_min, lon_max))
    }

    /// A box that contains every building this predicate can match.
    pub fn prefilter_bounds(&self) -> BoundingBox {
        match self {
            Self::Radius {
                center,
                radius_meters,
            } => radius_bounds(*center, *radius_meters),
            Self::Rectangle(bounds) => *bounds,
        }
    }

    pub fn matches(&self, building: &Building) -> bool {
        match self {
            Self::Radius {
                center,
                radius_meters,
            } => within_radius(*center, *radius_meters, building),
            Self::Rectangle(bounds) => within_rectangle(bounds, building),
        }
    }
}
