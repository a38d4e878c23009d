//! Hearthlink - Remote-control client for the Hearth home/media daemon.
//!
//! This library maintains a persistent WebSocket connection to a single
//! Hearth daemon, forwards user-issued commands, and decodes the daemon's
//! status pushes (now-playing media, connected Bluetooth devices, WiFi
//! throughput, console output) into typed state streams.
//!
//! # Architecture
//!
//! The client follows a single-owner model:
//!
//! - **Connection manager task**: owns the socket and the reconnect state
//!   machine; the only code that ever touches either
//! - **[`Client`] handles**: cheap clones that enqueue fire-and-forget
//!   operations and read the state streams
//!
//! Key design principles:
//!
//! - One live socket at a time; a new `connect` always supersedes the last
//! - Bounded automatic reconnection on a flat delay (no exponential backoff)
//! - One bad frame costs one error event, never the connection
//! - Commands sent while disconnected are dropped, not queued
//!
//! # Quick Start
//!
//! ```no_run
//! use hearthlink::{Client, Command, ConnectionTarget};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new();
//!     client.connect(ConnectionTarget::new("deck.local", 8765, "/ws"));
//!
//!     let mut now_playing = client.now_playing();
//!     client.send(Command::PlayerToggle);
//!
//!     while now_playing.changed().await.is_ok() {
//!         if let Some(now) = now_playing.borrow().as_ref() {
//!             println!("now playing: {:?}", now.media.title);
//!         }
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client handle, builder, and state streams |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | Wire message types (internal shapes, public payloads) |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Client handle, builder, and state streams.
///
/// Use [`Client::new()`] or [`Client::builder()`] to get a handle.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Wire protocol message types.
///
/// Defines the outbound command frame and the typed status payloads.
pub mod protocol;

/// WebSocket transport layer.
///
/// Internal module owning the connection manager task.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Client types
pub use client::state::{ConnectionState, ErrorEvent, StateStreams};
pub use client::{Client, ClientBuilder};

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{BluetoothDevice, Command, MediaInfo, NowPlaying, WifiInfo};

// Transport types
pub use transport::ConnectionTarget;
