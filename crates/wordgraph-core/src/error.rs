//! Centralized error types for wordgraph.

use std::time::Duration;

use thiserror::Error;

/// Main error type for synchronization operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unable to reach {target} after {attempts} attempt(s): {message}")]
    Connection {
        target: String,
        attempts: u32,
        message: String,
    },

    #[error("Malformed record for '{key}': {message}")]
    Decode { key: String, message: String },

    #[error("Graph store rejected unit for '{key}': {message}")]
    Transaction { key: String, message: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Unit for '{key}' timed out after {elapsed:?}")]
    Timeout { key: String, elapsed: Duration },

    #[error("Interrupted while waiting to reconnect to {0}")]
    Interrupted(String),

    #[error("A synchronization pass is already running")]
    PassInProgress,
}

/// Result type for synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a connection error for a handle that was lost or never acquired.
    pub fn connection(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            target: target.into(),
            attempts: 1,
            message: message.into(),
        }
    }

    /// Create a decode error for one key.
    pub fn decode(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create a transaction error for one key.
    pub fn transaction(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transaction {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error means a long-lived handle is gone and the pass
    /// cannot continue.
    pub fn is_connection_loss(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Whether the process should stop before any scheduling happens.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::Connection { .. } | Self::Interrupted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_key_errors_are_recoverable() {
        assert!(!SyncError::decode("bad", "expected value").is_fatal());
        assert!(!SyncError::transaction("bad", "constraint").is_fatal());
        assert!(!SyncError::Timeout {
            key: "slow".to_string(),
            elapsed: Duration::from_secs(1)
        }
        .is_fatal());
    }

    #[test]
    fn test_startup_errors_are_fatal() {
        assert!(SyncError::configuration("missing cache url").is_fatal());
        assert!(SyncError::Interrupted("redis".to_string()).is_fatal());
        let err = SyncError::connection("neo4j", "refused");
        assert!(err.is_fatal());
        assert!(err.is_connection_loss());
    }

    #[test]
    fn test_messages_carry_the_key() {
        let err = SyncError::decode("apple", "trailing comma");
        assert_eq!(err.to_string(), "Malformed record for 'apple': trailing comma");
    }
}
