//! WebSocket protocol message types.
//!
//! This module defines the message format for communication between the
//! client (Rust) and the Hearth daemon.
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | [`CommandFrame`] | Client → Daemon | Opaque command string |
//! | [`Inbound`] | Daemon → Client | Status push, discriminated by `"status"` |
//!
//! Unlike request/response protocols there is no correlation: commands are
//! fire-and-forget, and status frames arrive whenever the daemon has news.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Outbound command vocabulary and wire frame |
//! | `message` | Inbound frame decoding and dispatch |
//! | `status` | Typed status payloads |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound command vocabulary and wire frame.
pub mod command;

/// Inbound frame decoding and dispatch.
pub mod message;

/// Typed status payloads.
pub mod status;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{Command, CommandFrame};
pub use message::{Inbound, decode};
pub use status::{BluetoothDevice, MediaInfo, NowPlaying, WifiInfo};
