//! Long-lived handle acquisition with bounded retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{SyncError, SyncResult};

/// Fixed-spacing retry budget for acquiring a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: delay.as_millis() as u64,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Run `attempt` until it succeeds or the policy is exhausted.
///
/// The closure receives the 1-based attempt number. Cancelling `shutdown`
/// while waiting between attempts ends the loop with `Interrupted`.
pub async fn retry_connect<T, E, F, Fut>(
    target: &str,
    policy: &RetryPolicy,
    shutdown: &CancellationToken,
    mut attempt: F,
) -> SyncResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    for n in 1..=max_attempts {
        info!(target_name = target, attempt = n, max_attempts, "Connecting");
        match attempt(n).await {
            Ok(handle) => {
                info!(target_name = target, attempt = n, "Connected");
                return Ok(handle);
            }
            Err(e) => {
                warn!(target_name = target, attempt = n, max_attempts, error = %e, "Connection attempt failed");
                last_error = e.to_string();
            }
        }

        if n < max_attempts {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    warn!(target_name = target, "Retry wait interrupted");
                    return Err(SyncError::Interrupted(target.to_string()));
                }
                _ = tokio::time::sleep(policy.delay()) => {}
            }
        }
    }

    Err(SyncError::Connection {
        target: target.to_string(),
        attempts: max_attempts,
        message: last_error,
    })
}

/// Owner of one long-lived handle.
///
/// The handle is acquired once, shared by reference (clients clone it where
/// they need an owned copy) and dropped by [`ConnectionManager::close`].
pub struct ConnectionManager<T> {
    target: String,
    handle: Option<T>,
}

impl<T> ConnectionManager<T> {
    /// Acquire a handle through `connector` under `policy`.
    pub async fn connect<E, F, Fut>(
        target: impl Into<String>,
        policy: &RetryPolicy,
        shutdown: &CancellationToken,
        connector: F,
    ) -> SyncResult<Self>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let target = target.into();
        let handle = retry_connect(&target, policy, shutdown, connector).await?;
        Ok(Self {
            target,
            handle: Some(handle),
        })
    }

    /// Wrap a handle that was obtained elsewhere.
    pub fn from_handle(target: impl Into<String>, handle: T) -> Self {
        Self {
            target: target.into(),
            handle: Some(handle),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Borrow the live handle.
    pub fn handle(&self) -> SyncResult<&T> {
        self.handle
            .as_ref()
            .ok_or_else(|| SyncError::connection(self.target.clone(), "connection is closed"))
    }

    /// Release the handle. Returns `false` when it was already released.
    pub fn close(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                drop(handle);
                info!(target_name = %self.target, "Connection closed");
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for ConnectionManager<T> {
    fn drop(&mut self) {
        self.close();
    }
}
