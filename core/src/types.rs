//! Shared primitive types used across the entire crate.

/// Row identifiers, assigned by the store and strictly increasing
/// per entity table. Never reused.
pub type CustomerId = i64;
pub type ProductId = i64;
pub type OrderId = i64;
pub type ItemId = i64;

/// Money in integer minor units (cents). All storage and accumulation
/// happens in cents; conversion to a 2-decimal display value is the
/// reporter's job and happens exactly once.
pub type Cents = i64;
