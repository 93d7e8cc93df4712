//! Redis connection pool management.

use redis::aio::ConnectionManager;
use thiserror::Error;

use wordgraph_core::error::SyncError;

/// Redis error types.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Invalid cache URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: redis::RedisError,
    },
}

/// Result type for Redis operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Redis connection pool. ConnectionManager multiplexes one connection and
/// reconnects on its own; it is Clone, so callers clone it per operation.
pub type CachePool = ConnectionManager;

/// Target name used in logs and connection errors.
pub const CACHE_TARGET: &str = "redis";

/// Initialize a Redis connection pool from a URL.
///
/// Example URL: `redis://127.0.0.1:6379`
pub async fn init_pool(redis_url: &str) -> CacheResult<CachePool> {
    let client = redis::Client::open(redis_url).map_err(|source| CacheError::InvalidUrl {
        url: redis_url.to_string(),
        source,
    })?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}

/// Whether a Redis error means the server cannot be reached.
pub fn is_transport_error(err: &redis::RedisError) -> bool {
    err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout()
}

impl From<CacheError> for SyncError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Redis(ref e) if is_transport_error(e) => {
                SyncError::connection(CACHE_TARGET, e.to_string())
            }
            invalid @ CacheError::InvalidUrl { .. } => SyncError::configuration(invalid.to_string()),
            other => SyncError::Cache(other.to_string()),
        }
    }
}
