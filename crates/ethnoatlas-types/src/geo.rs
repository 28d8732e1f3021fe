//! Geographic primitives: points, region polygons, and the containment
//! predicate used by the geographic criterion.
//!
//! Coordinates are WGS84 degrees stored as plain `f64` pairs. Region
//! geometries are simple exterior rings; the containment test treats a
//! boundary-touching point as contained (intersects semantics, not
//! strictly-inside).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tolerance for collinearity when testing a point against ring edges.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A single WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Degrees east of the prime meridian.
    pub longitude: f64,
    /// Degrees north of the equator.
    pub latitude: f64,
}

impl GeoPoint {
    /// Build a point from `(longitude, latitude)` degrees.
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// A polygon given as one exterior ring of vertices.
///
/// The ring is implicitly closed: an edge runs from the last vertex back to
/// the first. Vertex order (clockwise or counterclockwise) does not matter
/// for containment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPolygon {
    /// Exterior ring vertices.
    pub exterior: Vec<GeoPoint>,
}

impl GeoPolygon {
    /// Build a polygon from its exterior ring.
    pub const fn new(exterior: Vec<GeoPoint>) -> Self {
        Self { exterior }
    }

    /// Whether `point` intersects this polygon.
    ///
    /// Points exactly on an edge or vertex count as intersecting. Interior
    /// membership uses even-odd ray casting on the exterior ring.
    pub fn contains(&self, point: GeoPoint) -> bool {
        if self.exterior.is_empty() {
            return false;
        }
        if self.edges().any(|(a, b)| point_on_segment(point, a, b)) {
            return true;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            let crosses = (a.latitude > point.latitude) != (b.latitude > point.latitude);
            if crosses {
                let t = (point.latitude - a.latitude) / (b.latitude - a.latitude);
                let edge_longitude = a.longitude + t * (b.longitude - a.longitude);
                if point.longitude < edge_longitude {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Iterate the ring's edges, including the closing last-to-first edge.
    fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let count = self.exterior.len();
        self.exterior
            .iter()
            .copied()
            .zip(self.exterior.iter().copied().cycle().skip(1))
            .take(count)
    }
}

/// Whether `point` lies on the closed segment from `a` to `b`.
fn point_on_segment(point: GeoPoint, a: GeoPoint, b: GeoPoint) -> bool {
    let cross = (b.longitude - a.longitude) * (point.latitude - a.latitude)
        - (b.latitude - a.latitude) * (point.longitude - a.longitude);
    if cross.abs() > BOUNDARY_EPSILON {
        return false;
    }
    let dot = (point.longitude - a.longitude) * (b.longitude - a.longitude)
        + (point.latitude - a.latitude) * (b.latitude - a.latitude);
    if dot < -BOUNDARY_EPSILON {
        return false;
    }
    let squared_length = (b.longitude - a.longitude).powi(2) + (b.latitude - a.latitude).powi(2);
    dot <= squared_length + BOUNDARY_EPSILON
}
