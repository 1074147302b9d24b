//! The dictionary type backing [`Shape::Dictionary`](crate::Shape::Dictionary).
//!
//! By default this is a `BTreeMap`, so iteration is sorted by key.
//! With the `indexmap` feature enabled, entries iterate in the order they
//! were first seen in the input. Equality is order-insensitive either way.

#[cfg(feature = "indexmap")]
mod inner {
    pub type Map<K, V> = indexmap::IndexMap<K, V>;
    pub use indexmap::map::Entry;
}

#[cfg(not(feature = "indexmap"))]
mod inner {
    pub type Map<K, V> = std::collections::BTreeMap<K, V>;
    pub use std::collections::btree_map::Entry;
}

pub use inner::{Entry, Map};
