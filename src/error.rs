//! Error types for the Hearth client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use hearthlink::{ConnectionTarget, Result};
//!
//! fn example() -> Result<()> {
//!     let target = ConnectionTarget::new("deck.local", 8765, "/ws");
//!     let url = target.url()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::BadFrame`], [`Error::Protocol`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length of raw frame text quoted in [`Error::BadFrame`].
///
/// Artwork frames can embed multi-megabyte data URIs; the quoted excerpt is
/// capped so error events stay readable.
const FRAME_EXCERPT_LEN: usize = 256;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a connection target or client option is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the connection cannot be established.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection timeout while dialing the server.
    ///
    /// Returned when the server does not complete the handshake in time.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    ///
    /// Returned when the connection is lost during operation.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Undecodable or schema-violating status frame.
    ///
    /// Carries an excerpt of the offending frame text for diagnosis.
    /// Frame errors never interrupt the connection.
    #[error("Bad frame ({reason}): {frame}")]
    BadFrame {
        /// Why the frame was rejected.
        reason: String,
        /// Excerpt of the raw frame text.
        frame: String,
    },

    /// Protocol violation outside of frame decoding.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a bad-frame error quoting an excerpt of the raw text.
    pub fn bad_frame(reason: impl Into<String>, frame: &str) -> Self {
        let frame = if frame.len() > FRAME_EXCERPT_LEN {
            let mut end = FRAME_EXCERPT_LEN;
            while !frame.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}…", &frame[..end])
        } else {
            frame.to_string()
        };

        Self::BadFrame {
            reason: reason.into(),
            frame,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectionTimeout { .. })
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this is a per-frame protocol error.
    ///
    /// Frame errors are isolated: they surface as error events without
    /// touching the connection state machine.
    #[inline]
    #[must_use]
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Self::BadFrame { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::connection("refused");
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("empty host");
        assert_eq!(err.to_string(), "Configuration error: empty host");
    }

    #[test]
    fn test_bad_frame_includes_raw_text() {
        let err = Error::bad_frame("missing field `output`", r#"{"status":"player"}"#);
        let text = err.to_string();
        assert!(text.contains("missing field `output`"));
        assert!(text.contains(r#"{"status":"player"}"#));
    }

    #[test]
    fn test_bad_frame_excerpt_is_capped() {
        let raw = "x".repeat(10_000);
        let err = Error::bad_frame("oversized", &raw);
        assert!(err.to_string().len() < 400);
    }

    #[test]
    fn test_bad_frame_excerpt_respects_char_boundaries() {
        let raw = "é".repeat(FRAME_EXCERPT_LEN);
        let err = Error::bad_frame("utf8", &raw);
        // Must not panic slicing mid-character.
        let _ = err.to_string();
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::ConnectionTimeout { timeout_ms: 5000 };
        let other_err = Error::connection("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_connection_error() {
        let conn_err = Error::connection("test");
        let timeout_err = Error::ConnectionTimeout { timeout_ms: 1000 };
        let closed_err = Error::ConnectionClosed;
        let frame_err = Error::bad_frame("nope", "{}");

        assert!(conn_err.is_connection_error());
        assert!(timeout_err.is_connection_error());
        assert!(closed_err.is_connection_error());
        assert!(!frame_err.is_connection_error());
    }

    #[test]
    fn test_is_frame_error() {
        assert!(Error::bad_frame("r", "{}").is_frame_error());
        assert!(!Error::ConnectionClosed.is_frame_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::ConnectionRefused, "refused");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
