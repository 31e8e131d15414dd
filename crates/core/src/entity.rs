//! Entity trait: identity that outlives attribute changes.

/// Entity marker + minimal interface.
///
/// In this domain identity is attempt-scoped: an order id only correlates the
/// collaborator calls and events emitted during one checkout.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
