//! Hashing primitives shared by keys, multimaps and dependency tracking.
//!
//! By default these are backed by `ahash` and `hashbrown`; enabling the
//! `std-hash` feature swaps both for their `std` equivalents.

use core::hash::Hash;
use std::hash::Hasher;

#[cfg(feature = "std-hash")]
pub mod default {
    pub use std::collections::hash_map::DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod default {
    pub use ahash::AHasher as DefaultHasher;

    #[inline]
    pub fn new() -> DefaultHasher {
        DefaultHasher::default()
    }
}

#[cfg(feature = "std-hash")]
pub(crate) mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub(crate) mod map {
    pub use hashbrown::HashMap;
}

/// Digest of a dependency list, compared between updates by `use_memo`
/// and the effect hooks.
#[inline]
pub fn hash_deps<T: Hash + ?Sized>(deps: &T) -> u64 {
    let mut h = default::new();
    deps.hash(&mut h);
    h.finish()
}
