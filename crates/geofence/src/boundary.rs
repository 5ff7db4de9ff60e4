//! Quadrilateral geofence boundaries and point containment.

use serde::{Deserialize, Serialize};

use skyroster_core::ValueObject;

/// A geographic coordinate. Latitude runs north/south (the y-axis of the
/// containment test), longitude east/west (the x-axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl ValueObject for GeoPoint {}

/// A simple (non-self-intersecting) quadrilateral in geographic coordinate
/// space, described by four vertices tracing the boundary. Winding direction
/// does not matter; vertex order does, since edges connect consecutive
/// vertices with the last wrapping back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadBoundary {
    vertices: [GeoPoint; 4],
}

impl QuadBoundary {
    pub fn new(p1: GeoPoint, p2: GeoPoint, p3: GeoPoint, p4: GeoPoint) -> Self {
        Self {
            vertices: [p1, p2, p3, p4],
        }
    }

    pub fn vertices(&self) -> &[GeoPoint; 4] {
        &self.vertices
    }

    /// Even-odd ray-casting containment test.
    ///
    /// Casts a horizontal ray rightward from the query point and toggles an
    /// inside flag on every edge whose latitudes straddle the query latitude
    /// and whose crossing longitude lies right of the query point. A point
    /// exactly on an edge or vertex gets an unspecified result; that is the
    /// even-odd method's usual boundary ambiguity and callers are expected
    /// to tolerate it.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let x = point.longitude;
        let y = point.latitude;

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let xi = self.vertices[i].longitude;
            let yi = self.vertices[i].latitude;
            let xj = self.vertices[j].longitude;
            let yj = self.vertices[j].latitude;

            let straddles = (yi > y) != (yj > y);
            if straddles && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}

impl ValueObject for QuadBoundary {}
