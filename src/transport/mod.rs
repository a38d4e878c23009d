//! WebSocket transport layer.
//!
//! This module owns the client side of the wire: where the daemon lives
//! ([`ConnectionTarget`]) and the task that keeps a socket to it alive
//! (`manager`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Client (Rust)  │                              │  Hearth daemon  │
//! │                 │         WebSocket            │                 │
//! │  Connection     │─────────────────────────────►│  WebSocket      │
//! │  Manager task   │      ws://host:port/path     │  server         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. A client handle issues `connect(target)`
//! 2. The manager dials `ws://host:port/path` with a bounded handshake
//! 3. Status frames flow in, command frames flow out
//! 4. On loss, the manager retries on a flat delay until the budget runs out
//! 5. `close()` (or dropping every handle) tears the socket down
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `manager` | Connection lifecycle manager task |
//! | `target` | Daemon endpoint addressing |

// ============================================================================
// Submodules
// ============================================================================

/// Connection lifecycle manager task.
pub(crate) mod manager;

/// Daemon endpoint addressing.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

pub use target::ConnectionTarget;
