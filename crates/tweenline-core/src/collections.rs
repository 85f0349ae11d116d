#[cfg(feature = "std-hash")]
pub(crate) mod map {
    pub use std::collections::HashSet;
}

#[cfg(not(feature = "std-hash"))]
pub(crate) mod map {
    pub use rustc_hash::FxHashSet as HashSet;
}
