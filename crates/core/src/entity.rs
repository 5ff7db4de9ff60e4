//! Entity marker: objects with an identity that outlives their field values.

/// An object tracked by identity rather than by value.
///
/// An assignment row stays the same entity when its `end_at` is stamped; a
/// catalog definition stays the same entity when its display name changes.
/// Equality of entities is equality of their ids.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
