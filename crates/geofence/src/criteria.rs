//! Flight criteria: a geofence paired with altitude and groundspeed windows.

use serde::{Deserialize, Serialize};

use skyroster_core::ValueObject;

use crate::boundary::{GeoPoint, QuadBoundary};

/// An optionally half-open inclusive range. `None` on either side means
/// unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Window<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl<T> Default for Window<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

/// One reported aircraft position sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub position: GeoPoint,
    /// Feet above mean sea level.
    pub altitude: i32,
    /// Knots over the ground.
    pub groundspeed: i32,
}

impl PositionReport {
    pub fn new(position: GeoPoint, altitude: i32, groundspeed: i32) -> Self {
        Self {
            position,
            altitude,
            groundspeed,
        }
    }
}

impl ValueObject for PositionReport {}

/// One leg of a monitored flight: a geofenced region the aircraft must
/// report from, optionally constrained to altitude and groundspeed windows.
/// Legs carry an `order` so a flight's criteria form a sequence; evaluating
/// that sequence is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightCriteria {
    pub order: u32,
    pub boundary: QuadBoundary,
    #[serde(default)]
    pub altitude: Window<i32>,
    #[serde(default)]
    pub groundspeed: Window<i32>,
}

impl FlightCriteria {
    /// A leg bounded only by its geofence.
    pub fn new(order: u32, boundary: QuadBoundary) -> Self {
        Self {
            order,
            boundary,
            altitude: Window::unbounded(),
            groundspeed: Window::unbounded(),
        }
    }

    pub fn with_altitude(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.altitude = Window::new(min, max);
        self
    }

    pub fn with_groundspeed(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.groundspeed = Window::new(min, max);
        self
    }

    /// Whether the report satisfies this leg: inside the geofence and within
    /// both windows.
    pub fn is_satisfied_by(&self, report: &PositionReport) -> bool {
        self.boundary.contains(report.position)
            && self.altitude.contains(report.altitude)
            && self.groundspeed.contains(report.groundspeed)
    }
}

impl ValueObject for FlightCriteria {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_boundary() -> QuadBoundary {
        QuadBoundary::new(
            GeoPoint::new(50.0, -2.0),
            GeoPoint::new(50.0, 0.0),
            GeoPoint::new(52.0, 0.0),
            GeoPoint::new(52.0, -2.0),
        )
    }

    fn inside_report(altitude: i32, groundspeed: i32) -> PositionReport {
        PositionReport::new(GeoPoint::new(51.0, -1.0), altitude, groundspeed)
    }

    #[test]
    fn unbounded_window_accepts_everything() {
        let window: Window<i32> = Window::unbounded();
        assert!(window.contains(i32::MIN));
        assert!(window.contains(0));
        assert!(window.contains(i32::MAX));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = Window::new(Some(2000), Some(4000));
        assert!(window.contains(2000));
        assert!(window.contains(4000));
        assert!(!window.contains(1999));
        assert!(!window.contains(4001));

        let floor_only = Window::new(Some(250), None);
        assert!(floor_only.contains(250));
        assert!(floor_only.contains(i32::MAX));
        assert!(!floor_only.contains(249));

        let ceiling_only = Window::new(None, Some(140));
        assert!(ceiling_only.contains(i32::MIN));
        assert!(!ceiling_only.contains(141));
    }

    #[test]
    fn geofence_only_leg_matches_any_altitude_and_speed() {
        let leg = FlightCriteria::new(0, test_boundary());

        assert!(leg.is_satisfied_by(&inside_report(100, 10)));
        assert!(leg.is_satisfied_by(&inside_report(41_000, 520)));
    }

    #[test]
    fn report_outside_the_geofence_never_matches() {
        let leg = FlightCriteria::new(0, test_boundary());
        let outside = PositionReport::new(GeoPoint::new(55.0, -1.0), 3000, 120);

        assert!(!leg.is_satisfied_by(&outside));
    }

    #[test]
    fn windows_reject_reports_outside_their_bounds() {
        let leg = FlightCriteria::new(1, test_boundary())
            .with_altitude(Some(2000), Some(4000))
            .with_groundspeed(None, Some(140));

        assert!(leg.is_satisfied_by(&inside_report(3000, 120)));
        assert!(!leg.is_satisfied_by(&inside_report(1500, 120)));
        assert!(!leg.is_satisfied_by(&inside_report(4500, 120)));
        assert!(!leg.is_satisfied_by(&inside_report(3000, 180)));
    }
}
