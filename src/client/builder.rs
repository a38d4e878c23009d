//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`Client`] instances.
//!
//! # Example
//!
//! ```no_run
//! use hearthlink::Client;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = Client::builder()
//!     .max_retries(3)
//!     .retry_delay(Duration::from_secs(5))
//!     .build();
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::state::StateSinks;
use crate::transport::manager::{ConnectionManager, RetryPolicy};

use super::Client;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`Client`] instance.
///
/// Every knob has a production default; overriding them is mostly useful for
/// tests and unusual network environments. Use [`Client::builder()`] to
/// create a new builder.
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    /// Reconnect policy handed to the manager task.
    policy: RetryPolicy,
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new builder with default policy.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the automatic reconnect budget per connect sequence.
    ///
    /// Default: 5. A successful connection or a user-issued `connect`
    /// refills the budget.
    #[inline]
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.policy.max_retries = max_retries;
        self
    }

    /// Sets the flat delay between reconnect attempts.
    ///
    /// Default: 5 seconds. The delay is constant; there is no exponential
    /// backoff.
    #[inline]
    #[must_use]
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.policy.retry_delay = retry_delay;
        self
    }

    /// Sets the bound on a single dial (TCP connect plus handshake).
    ///
    /// Default: 10 seconds.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.policy.connect_timeout = connect_timeout;
        self
    }

    /// Spawns the connection manager task and returns the client handle.
    ///
    /// Must be called from within a Tokio runtime. The manager task lives
    /// until the last [`Client`] clone is dropped.
    #[must_use]
    pub fn build(self) -> Client {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (sinks, streams) = StateSinks::channel();

        tokio::spawn(ConnectionManager::new(control_rx, sinks, self.policy).run());

        Client::from_parts(control_tx, streams)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_constants() {
        let builder = ClientBuilder::new();
        assert_eq!(builder.policy, RetryPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let builder = ClientBuilder::new()
            .max_retries(2)
            .retry_delay(Duration::from_millis(100))
            .connect_timeout(Duration::from_secs(1));

        assert_eq!(builder.policy.max_retries, 2);
        assert_eq!(builder.policy.retry_delay, Duration::from_millis(100));
        assert_eq!(builder.policy.connect_timeout, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_build_spawns_idle_manager() {
        let client = ClientBuilder::new().build();
        assert_eq!(
            client.status(),
            crate::client::state::ConnectionState::Disconnected
        );
    }
}
