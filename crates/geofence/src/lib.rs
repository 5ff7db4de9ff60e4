//! skyroster-geofence: containment testing for geofenced flight criteria.
//!
//! A boundary is a simple quadrilateral in geographic coordinates; the
//! evaluator decides whether a reported position falls inside it. Nothing
//! here touches the membership ledger; the two components are independent.

pub mod boundary;
pub mod criteria;

pub use boundary::{GeoPoint, QuadBoundary};
pub use criteria::{FlightCriteria, PositionReport, Window};
