//! Queries against the source hashes.

pub mod frequencies;
pub mod relations;
