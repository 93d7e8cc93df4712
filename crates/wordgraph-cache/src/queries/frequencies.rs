//! Frequencies hash queries: word -> JSON array of usage observations.

use crate::client::{CachePool, CacheResult};
use redis::AsyncCommands;

/// Raw observations record for `word`, undecoded.
pub async fn get_observations_raw(pool: &CachePool, map: &str, word: &str) -> CacheResult<Option<Vec<u8>>> {
    let mut conn = pool.clone();
    let raw: Option<Vec<u8>> = conn.hget(map, word).await?;
    Ok(raw)
}
