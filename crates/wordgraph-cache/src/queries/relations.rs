//! Relations hash queries: word -> JSON array of related words.

use crate::client::{CachePool, CacheResult};
use redis::AsyncCommands;

/// Every word that currently has a relations record.
pub async fn list_words(pool: &CachePool, map: &str) -> CacheResult<Vec<String>> {
    let mut conn = pool.clone();
    let words: Vec<String> = conn.hkeys(map).await?;
    Ok(words)
}

/// Raw relations record for `word`, if it still exists.
pub async fn get_related_raw(pool: &CachePool, map: &str, word: &str) -> CacheResult<Option<String>> {
    let mut conn = pool.clone();
    let raw: Option<String> = conn.hget(map, word).await?;
    Ok(raw)
}
