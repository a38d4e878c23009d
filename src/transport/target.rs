//! Connection target addressing.
//!
//! A [`ConnectionTarget`] names where the Hearth daemon listens. It is
//! composed into a single `ws://host:port/path` URL at dial time; there is
//! no TLS variant.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// ConnectionTarget
// ============================================================================

/// Address of the daemon's WebSocket endpoint.
///
/// Immutable once handed to `connect`; a reconnect sequence always re-dials
/// the same target.
///
/// # Example
///
/// ```
/// use hearthlink::ConnectionTarget;
///
/// let target = ConnectionTarget::new("deck.local", 8765, "/ws");
/// assert_eq!(target.to_string(), "ws://deck.local:8765/ws");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Host name or IP address.
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// URL path, normalized to a leading slash.
    pub path: String,
}

impl ConnectionTarget {
    /// Creates a target, normalizing the path to a leading slash.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            host: host.into(),
            port,
            path,
        }
    }

    /// Composes and validates the WebSocket URL for this target.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the composed URL is not valid (e.g. empty or
    /// malformed host).
    pub fn url(&self) -> Result<Url> {
        Url::parse(&self.to_string())
            .map_err(|e| Error::config(format!("invalid connection target `{self}`: {e}")))
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws://{}:{}{}", self.host, self.port, self.path)
    }
}

// ============================================================================
// Tests
// ============================================================================
