//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: they are defined entirely by their
//! attribute values, and two value objects holding the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// construct a new instance with the new values. A signed-in user is the
/// canonical example here: changing a role means issuing a new `User`, never
/// mutating the one a session already holds.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Grant {
///     path: String,
///     role: Role,
/// }
///
/// impl ValueObject for Grant {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
