//! Wordgraph Redis source layer
//!
//! Reads the word-association dataset from Redis. Two hashes are expected,
//! both keyed by word: one holding a JSON array of related words, one
//! holding a JSON array of `{"frequency": n, ...}` usage observations.

pub mod client;
pub mod queries;
pub mod source;

pub use client::{CACHE_TARGET, CacheError, CachePool, CacheResult, init_pool};
pub use source::RedisSource;
