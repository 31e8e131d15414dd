//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes. A line item
/// named "Potion" worth 80.00 is equal to any other line item with the same
/// name and value; there is nothing else to tell them apart.
///
/// To "change" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
