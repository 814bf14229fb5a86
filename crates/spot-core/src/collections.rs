//! Hash collection aliases shared by the Spot crates.
//!
//! The default build uses the Fx hasher; enable `std-hash` to fall back to
//! the standard library's SipHash containers.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}

/// Creates an empty set with the configured hasher.
pub fn new_set<T>() -> map::HashSet<T> {
    map::HashSet::default()
}
