//! Value object marker: objects defined entirely by their attribute values.

/// Marker trait for immutable, compared-by-value domain objects.
///
/// A `GeoPoint { latitude: 51.47, longitude: -0.45 }` is a value object: two
/// with the same coordinates are the same point, and "changing" one means
/// constructing a new one. Contrast with [`Entity`](crate::entity::Entity)
/// types like a state definition, which keep their identity as their values
/// change.
///
/// The bounds are the minimum that value semantics imply: cheap duplication
/// (`Clone`), comparison by attributes (`PartialEq`), and printability for
/// logs and test failures (`Debug`).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
