//! # cadence-cache
//!
//! TTL-bounded caching around a flat series store: a whole-table series
//! slot plus a per-user prediction cache with write-triggered coarse
//! invalidation. Model fitting upstream is only acceptable per call
//! because this layer absorbs repeat calls within the TTL.

pub mod layer;

pub use layer::CacheLayer;
